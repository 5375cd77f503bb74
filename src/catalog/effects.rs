//! The closed effect-tag vocabulary and crop-name recognition
//!
//! The engine needs to distinguish a numeric condition key that names a crop
//! from one that names a dependency mutation id. Crop names are not given to
//! the engine as a closed set in spec.md's data model — only effect tags are
//! closed. We therefore resolve "is this a crop" the way spec §4.1 implies:
//! any numeric condition key that is not `adjacent_crops` and not present in
//! the catalog as another mutation's id is treated as a crop name. See
//! `catalog::parser` for where that resolution happens; this module only
//! carries the effect-tag vocabulary, which spec.md *does* close.

use std::collections::BTreeSet;

/// Effect tags that count as "positive" for `has_only_positive_effect` and
/// for godseed coverage.
pub const POSITIVE_EFFECTS: &[&str] = &[
    "harvest_boost",
    "improved_harvest_boost",
    "effect_spread",
    "improved_effect_spread",
    "immunity",
    "bonus_drops",
    "water_retain",
    "improved_water_retain",
    "xp_boost",
    "improved_xp_boost",
];

/// Effect tags that count as "negative".
pub const NEGATIVE_EFFECTS: &[&str] = &["harvest_loss", "water_drain", "xp_loss"];

/// The six base positive-effect "types" godseed set-cover aims to satisfy.
/// An `improved_X` tag satisfies requirement `X`.
pub const GODSEED_COVERAGE_TYPES: &[&str] = &[
    "harvest_boost",
    "water_retain",
    "xp_boost",
    "immunity",
    "bonus_drops",
    "effect_spread",
];

/// `true` if `effects` contains a spread-effect tag (base or improved).
pub fn has_spread_effect(effects: &BTreeSet<String>) -> bool {
    effects.contains("effect_spread") || effects.contains("improved_effect_spread")
}

/// `true` if `effects` contains at least one positive tag and no negative tag.
pub fn has_only_positive_effect(effects: &BTreeSet<String>) -> bool {
    let has_positive = effects.iter().any(|e| POSITIVE_EFFECTS.contains(&e.as_str()));
    let has_negative = effects.iter().any(|e| NEGATIVE_EFFECTS.contains(&e.as_str()));
    has_positive && !has_negative
}

/// For a given base coverage type (e.g. `"harvest_boost"`), the set of effect
/// tags that satisfy it: the base tag itself and its `improved_` variant.
pub fn tags_satisfying(coverage_type: &str) -> [String; 2] {
    [coverage_type.to_string(), format!("improved_{coverage_type}")]
}

/// Integer-ish profit weight for a single effect tag in `MAX_PROFIT` scoring.
/// Returns `0.0` for tags outside the closed table (spec §4.12).
pub fn profit_weight(effect: &str) -> f64 {
    match effect {
        "improved_harvest_boost" => 100.0,
        "harvest_boost" => 60.0,
        "improved_water_retain" => 40.0,
        "water_retain" => 25.0,
        "improved_xp_boost" => 35.0,
        "xp_boost" => 20.0,
        "immunity" => 80.0,
        "bonus_drops" => 70.0,
        "improved_effect_spread" => 50.0,
        "effect_spread" => 30.0,
        "harvest_loss" => -40.0,
        "water_drain" => -30.0,
        "xp_loss" => -20.0,
        _ => 0.0,
    }
}
