//! The five named `StrategyProfile` constants `MultiStrategyOptimizer` iterates
//!
//! Spec §4.11: all five share `synergy_weight = 0.5`; only sharing,
//! compactness, corner, and (for `exploration`) randomness vary.

use crate::algorithm::scorer::StrategyProfile;

/// Balanced defaults: the profile favored when no strategy-specific tuning
/// is warranted.
pub const COMPACT_BALANCED: StrategyProfile = StrategyProfile {
    sharing_weight: 1.0,
    compactness_weight: 2.0,
    synergy_weight: 0.5,
    corner_weight: 1.0,
    randomness: 0.0,
};

/// Heavy compactness, light sharing/corner.
pub const ULTRA_COMPACT: StrategyProfile = StrategyProfile {
    sharing_weight: 0.5,
    compactness_weight: 3.0,
    synergy_weight: 0.5,
    corner_weight: 0.5,
    randomness: 0.0,
};

/// Favors crop reuse over raw compactness.
pub const COMPACT_SHARING: StrategyProfile = StrategyProfile {
    sharing_weight: 1.5,
    compactness_weight: 2.0,
    synergy_weight: 0.5,
    corner_weight: 0.5,
    randomness: 0.0,
};

/// Moderate sharing, strong compactness and corner.
pub const TIGHT_CLUSTER: StrategyProfile = StrategyProfile {
    sharing_weight: 0.8,
    compactness_weight: 2.5,
    synergy_weight: 0.5,
    corner_weight: 1.0,
    randomness: 0.0,
};

/// Balanced weights plus non-zero randomness so the solver occasionally
/// strays from the locally-best anchor.
pub const EXPLORATION: StrategyProfile = StrategyProfile {
    sharing_weight: 1.0,
    compactness_weight: 1.5,
    synergy_weight: 0.5,
    corner_weight: 1.0,
    randomness: 0.2,
};

/// All five named profiles paired with their label, in the order
/// `MultiStrategyOptimizer` iterates them.
pub const NAMED_PROFILES: &[(&str, StrategyProfile)] = &[
    ("compact-balanced", COMPACT_BALANCED),
    ("ultra-compact", ULTRA_COMPACT),
    ("compact-sharing", COMPACT_SHARING),
    ("tight-cluster", TIGHT_CLUSTER),
    ("exploration", EXPLORATION),
];

/// `randomness` values the initial GA population's `GreedySolver` seeds vary
/// across, one per population slot (spec §4.10).
pub const GA_SEED_RANDOMNESS: &[f64] = &[0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];
