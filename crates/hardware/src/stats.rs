//! Branch prediction statistics collection and reporting.
//!
//! This module tracks prediction quality for a simulated branch stream. It provides:
//! 1. **Summary:** Resolved branches, host time, and simulation throughput.
//! 2. **Branch prediction:** Lookups, mispredictions, accuracy, and fetch/resolve divergence.
//! 3. **Sites:** Per-address lookup and misprediction counts, worst offenders first.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Instant;

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"branch"`, `"sites"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "branch", "sites"];

/// Number of branch sites listed in the `sites` section.
const TOP_SITES: usize = 10;

/// Per-address prediction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteStats {
    /// Resolved branches at this address.
    pub lookups: u64,
    /// Mispredicted branches at this address.
    pub mispredictions: u64,
}

/// Branch prediction statistics for one simulated stream.
#[derive(Debug, Clone)]
pub struct BranchStats {
    start_time: Instant,
    /// Number of branch predictions that were correct.
    pub branch_predictions: u64,
    /// Number of branch predictions that were wrong (mispredictions).
    pub branch_mispredictions: u64,
    /// Branches whose fetch-time prediction differed from the prediction
    /// recomputed from predictor state just before training.
    pub divergent_predictions: u64,
    /// Per-address counters, ordered by address.
    pub sites: BTreeMap<u64, SiteStats>,
}

impl Default for BranchStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            branch_predictions: 0,
            branch_mispredictions: 0,
            divergent_predictions: 0,
            sites: BTreeMap::new(),
        }
    }
}

impl BranchStats {
    /// Records one resolved branch.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch.
    /// * `predicted` - Direction predicted at fetch.
    /// * `taken` - Resolved direction.
    pub fn record(&mut self, pc: u64, predicted: bool, taken: bool) {
        let site = self.sites.entry(pc).or_default();
        site.lookups += 1;
        if predicted == taken {
            self.branch_predictions += 1;
        } else {
            self.branch_mispredictions += 1;
            site.mispredictions += 1;
        }
    }

    /// Total number of resolved branches.
    pub const fn lookups(&self) -> u64 {
        self.branch_predictions + self.branch_mispredictions
    }

    /// Fraction of correct predictions in `0.0..=1.0`; `0.0` before any lookup.
    pub fn accuracy(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            self.branch_predictions as f64 / total as f64
        }
    }

    /// Returns up to `n` sites ordered by mispredictions (descending), then address.
    pub fn top_sites(&self, n: usize) -> Vec<(u64, SiteStats)> {
        let mut sites: Vec<(u64, SiteStats)> = self.sites.iter().map(|(&pc, &s)| (pc, s)).collect();
        sites.sort_by(|a, b| b.1.mispredictions.cmp(&a.1.mispredictions).then(a.0.cmp(&b.0)));
        sites.truncate(n);
        sites
    }

    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"branch"`, or `"sites"`.
    /// Pass an empty slice to render all sections.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();
        let lookups = self.lookups();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "BRANCH PREDICTION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let seconds = self.start_time.elapsed().as_secs_f64();
            let kbps = if seconds > 0.0 {
                (lookups as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_branches             {lookups}");
            let _ = writeln!(out, "sim_rate                 {kbps:.2} kbranch/s");
            let _ = writeln!(out, "sim_sites                {}", self.sites.len());
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("branch") {
            let _ = writeln!(out, "BRANCH PREDICTION");
            let _ = writeln!(out, "  bp.lookups             {lookups}");
            let _ = writeln!(out, "  bp.mispredicts         {}", self.branch_mispredictions);
            let _ = writeln!(out, "  bp.accuracy            {:.2}%", self.accuracy() * 100.0);
            let _ = writeln!(out, "  bp.divergent           {}", self.divergent_predictions);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("sites") {
            let _ = writeln!(out, "TOP MISPREDICTING SITES");
            for (pc, site) in self.top_sites(TOP_SITES) {
                let rate = if site.lookups > 0 {
                    (site.mispredictions as f64 / site.lookups as f64) * 100.0
                } else {
                    0.0
                };
                let _ = writeln!(
                    out,
                    "  {:#010x}  lookups: {:<8} | mispredicts: {:<8} | miss_rate: {:.2}%",
                    pc, site.lookups, site.mispredictions, rate
                );
            }
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
