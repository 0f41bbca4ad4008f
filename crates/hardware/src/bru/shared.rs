//! Shared (thread-safe) predictor handle.
//!
//! A predictor's `predict` only reads and its `train` reads and writes one
//! weight row plus the shared history register in a single step. When fetch
//! and resolve run on different threads, both must go through one mutual
//! exclusion domain so that every `train` is atomic relative to every other
//! call. `SharedPredictor` provides that domain as a cheaply clonable handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::BranchPredictor;

/// Clonable handle to a predictor guarded by a single mutex.
#[derive(Debug)]
pub struct SharedPredictor<P> {
    inner: Arc<Mutex<P>>,
}

impl<P> Clone for SharedPredictor<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: BranchPredictor> SharedPredictor<P> {
    /// Wraps `predictor` so it can be shared across threads.
    pub fn new(predictor: P) -> Self {
        Self {
            inner: Arc::new(Mutex::new(predictor)),
        }
    }

    /// Predicts the branch at `pc` under the lock.
    pub fn predict(&self, pc: u64) -> bool {
        self.lock().predict_branch(pc)
    }

    /// Trains the branch at `pc` under the lock.
    pub fn train(&self, pc: u64, taken: bool) {
        self.lock().update_branch(pc, taken);
    }

    /// Resets the predictor under the lock.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Runs `f` with exclusive access, e.g. to inspect weights consistently.
    pub fn with<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    /// Acquires the lock.
    ///
    /// A poisoned lock is recovered: predictor operations cannot panic
    /// mid-update, so the state behind it is always consistent.
    fn lock(&self) -> MutexGuard<'_, P> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
