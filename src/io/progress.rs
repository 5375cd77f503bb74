//! Progress-callback and abort-signal contract for long-running optimizer calls
//!
//! Spec §5: the engine is pure CPU with a single suspension point at its
//! boundary. Rather than the teacher's terminal-rendering `ProgressManager`
//! (`indicatif::MultiProgress`), a library with no I/O surface exposes this
//! as a plain callback invoked at a fixed cadence, paired with an abort
//! check consulted at the same cadence (spec §6's `optimizeLayout`, §5's
//! progress/cancellation contract).

use crate::io::configuration::PROGRESS_CADENCE_DIVISOR;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One progress snapshot, yielded every `cadence(max_iter)` iterations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressReport {
    /// Current iteration number.
    pub iter: u32,
    /// Iteration budget for this run.
    pub max_iter: u32,
    /// Current scalar score at this iteration.
    pub current_score: f64,
    /// Best scalar score observed so far.
    pub best_score: f64,
    /// Current annealing temperature, or `0.0` for non-annealing callers.
    pub temperature: f64,
    /// Number of mutation instances currently placed.
    pub placed_count: usize,
}

/// How many iterations elapse between progress callback invocations. Always
/// at least 1.
pub const fn cadence(max_iterations: u32) -> u32 {
    let divided = max_iterations / PROGRESS_CADENCE_DIVISOR;
    if divided == 0 { 1 } else { divided }
}

/// A cooperative abort signal. Cloning shares the same underlying flag;
/// checked at the same cadence as progress callbacks. Never leaves a State
/// mid-mutation — the caller samples it only between complete moves.
#[derive(Clone, Debug, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    /// A fresh, unset abort signal.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Request cancellation. Safe to call from any thread holding a clone.
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` if cancellation has been requested.
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
