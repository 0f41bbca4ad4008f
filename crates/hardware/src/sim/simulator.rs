//! Simulator: drives a branch stream through a predictor.
//!
//! Each branch is predicted when it is fetched and trained when it resolves.
//! `resolve_latency` younger branches are fetched in between, so with a
//! non-zero latency the predictor is queried with history that does not yet
//! contain the outcomes of in-flight branches, and training recomputes its
//! output from whatever state exists at resolve time.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::bru::{BranchPredictor, BranchPredictorWrapper};
use crate::common::error::ConfigError;
use crate::config::{Config, GeneralConfig};
use crate::sim::trace::BranchEvent;
use crate::stats::BranchStats;

/// A fetched branch waiting for resolution.
#[derive(Debug, Clone, Copy)]
struct InFlight {
    event: BranchEvent,
    predicted: bool,
}

/// Top-level simulator: predictor + in-flight window + statistics.
#[derive(Debug)]
pub struct Simulator {
    predictor: BranchPredictorWrapper,
    in_flight: VecDeque<InFlight>,
    resolve_latency: usize,
    trace_branches: bool,
    stats: BranchStats,
}

impl Simulator {
    /// Creates a simulator with the predictor selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the selected predictor's parameters are invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let predictor = BranchPredictorWrapper::new(&config.predictor)?;
        Ok(Self::with_predictor(predictor, &config.general))
    }

    /// Creates a simulator around an already constructed predictor.
    pub fn with_predictor(predictor: BranchPredictorWrapper, general: &GeneralConfig) -> Self {
        debug!(
            predictor = predictor.name(),
            resolve_latency = general.resolve_latency,
            "simulator created"
        );
        Self {
            predictor,
            in_flight: VecDeque::with_capacity(general.resolve_latency + 1),
            resolve_latency: general.resolve_latency,
            trace_branches: general.trace_branches,
            stats: BranchStats::default(),
        }
    }

    /// Fetches one branch: predicts it and resolves the oldest branches that
    /// fell out of the in-flight window.
    pub fn step(&mut self, event: BranchEvent) {
        let predicted = self.predictor.predict_branch(event.pc);
        self.in_flight.push_back(InFlight { event, predicted });
        while self.in_flight.len() > self.resolve_latency {
            self.resolve_oldest();
        }
    }

    /// Resolves every in-flight branch, oldest first.
    pub fn drain(&mut self) {
        while !self.in_flight.is_empty() {
            self.resolve_oldest();
        }
    }

    /// Runs a whole stream and drains the window.
    pub fn run<I>(&mut self, events: I) -> &BranchStats
    where
        I: IntoIterator<Item = BranchEvent>,
    {
        for event in events {
            self.step(event);
        }
        self.drain();
        &self.stats
    }

    /// Returns the statistics collected so far.
    pub const fn stats(&self) -> &BranchStats {
        &self.stats
    }

    /// Returns the predictor under simulation.
    pub const fn predictor(&self) -> &BranchPredictorWrapper {
        &self.predictor
    }

    /// Number of fetched branches not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Resets the predictor, discards in-flight branches, and clears statistics.
    pub fn reset(&mut self) {
        self.predictor.reset();
        self.in_flight.clear();
        self.stats = BranchStats::default();
    }

    fn resolve_oldest(&mut self) {
        let Some(InFlight { event, predicted }) = self.in_flight.pop_front() else {
            return;
        };

        if self.predictor.predict_branch(event.pc) != predicted {
            self.stats.divergent_predictions += 1;
        }
        self.stats.record(event.pc, predicted, event.taken);

        if self.trace_branches {
            trace!(
                pc = format_args!("{:#x}", event.pc),
                taken = event.taken,
                predicted,
                "branch resolved"
            );
        }

        self.predictor.update_branch(event.pc, event.taken);
    }
}
