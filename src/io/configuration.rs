//! Compile-time constants: objective-mode presets, misc knobs
//!
//! Mirrors the teacher's flat `const` module (`io::configuration`'s WFC
//! tuning knobs) but for this engine's metaheuristic stack. Spec §9 treats
//! these as compile-time constants "unless a host explicitly overrides them
//! via a configuration record". `SimulatedAnnealing`'s and `GeneticOptimizer`'s
//! own tuning structs live next to their algorithms
//! (`algorithm::annealing::SaConfig`, `algorithm::genetic::GaConfig`), the way
//! the teacher keeps an algorithm's config struct beside the algorithm itself;
//! this module holds `LayoutConfig` (objective-mode) and the handful of
//! cross-cutting knobs every strategy shares. Named strategy profiles live in
//! `analysis::profiles`, not here.

use crate::algorithm::objective::{LayoutConfig, Objective};

/// Board side length; re-exported here for configuration-adjacent callers
/// that don't want to depend directly on `spatial`.
pub const BOARD_SIDE: usize = crate::spatial::BOARD_SIZE;

/// Fixed seed for reproducible runs when a host does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// `quick` preset: fast, coarse search.
pub const QUICK: LayoutConfig = LayoutConfig {
    max_iterations: 1000,
    start_temperature: 50.0,
    cooling_rate: 0.99,
    objective: Objective::MaxCount,
};

/// `default` preset: balanced iteration budget and cooling schedule.
pub const DEFAULT: LayoutConfig = LayoutConfig {
    max_iterations: 20_000,
    start_temperature: 200.0,
    cooling_rate: 0.9995,
    objective: Objective::MaxCount,
};

/// `thorough` preset: large iteration budget, slow cooling.
pub const THOROUGH: LayoutConfig = LayoutConfig {
    max_iterations: 50_000,
    start_temperature: 500.0,
    cooling_rate: 0.9999,
    objective: Objective::MaxCount,
};

/// Fraction of total workload quantity a single mutation id must reach to
/// trigger `BulkPlacer`, spec §4.7.
pub const BULK_DOMINANCE_THRESHOLD: f64 = 0.70;

/// Cadence (in iterations) at which progress callbacks and the abort signal
/// are consulted: `max(1, max_iterations / PROGRESS_CADENCE_DIVISOR)`.
pub const PROGRESS_CADENCE_DIVISOR: u32 = 50;
