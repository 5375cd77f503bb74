//! Global fitness scoring over a whole `State`
//!
//! Mirrors the teacher's `analysis::metrics` accumulator (which folded a
//! whole generated grid into one acceptance scalar for its own annealing
//! loop) adapted to spec §4.9's placement-count/sharing/distance/synergy
//! breakdown.

use crate::catalog::{Catalog, effects};
use crate::spatial::{Placement, State};
use std::collections::{BTreeSet, HashMap};

/// The full breakdown `FitnessCalculator` produces alongside the scalar
/// acceptance score.
#[derive(Clone, Debug, PartialEq)]
pub struct FitnessBreakdown {
    /// `|placements|`.
    pub mutation_count: usize,
    /// Number of crop cells with `|serving| > 1`.
    pub shared_crop_count: usize,
    /// Total number of crop cells.
    pub total_crops: usize,
    /// Sum of pairwise Manhattan distances between placement anchors.
    pub total_distance: u32,
    /// Number of anchor pairs contributing to `total_distance`.
    pub distance_pairs: u32,
    /// Count of ordered `(a, b)` pairs where `a` spreads effects, `b` is
    /// only-positive, within Manhattan distance 3.
    pub synergy_count: u32,
    /// The scalar SA-acceptance score.
    pub score: f64,
}

/// Per-mutation-id spread/positive predicate cache, built once per
/// evaluation pass so repeated calls against the same catalog don't re-walk
/// its effect sets.
pub struct PredicateCache<'a> {
    catalog: &'a mut Catalog,
    available_ids: Vec<String>,
    spread: HashMap<String, bool>,
    positive: HashMap<String, bool>,
}

impl<'a> PredicateCache<'a> {
    /// Build a cache backed by `catalog`, resolving unknown ids against
    /// `available_ids` exactly as the rest of the engine does.
    pub fn new(catalog: &'a mut Catalog, available_ids: Vec<String>) -> Self {
        Self {
            catalog,
            available_ids,
            spread: HashMap::new(),
            positive: HashMap::new(),
        }
    }

    fn effects_of(&mut self, mutation_id: &str) -> BTreeSet<String> {
        self.catalog
            .parse_cached(mutation_id, &self.available_ids)
            .map(|m| m.effects.clone())
            .unwrap_or_default()
    }

    fn has_spread(&mut self, mutation_id: &str) -> bool {
        if let Some(&cached) = self.spread.get(mutation_id) {
            return cached;
        }
        let value = effects::has_spread_effect(&self.effects_of(mutation_id));
        self.spread.insert(mutation_id.to_string(), value);
        value
    }

    fn is_only_positive(&mut self, mutation_id: &str) -> bool {
        if let Some(&cached) = self.positive.get(mutation_id) {
            return cached;
        }
        let value = effects::has_only_positive_effect(&self.effects_of(mutation_id));
        self.positive.insert(mutation_id.to_string(), value);
        value
    }
}

/// Evaluate `state` against `target_count`, using `cache` to resolve each
/// placement's effect predicates (spec §4.9).
pub fn evaluate(state: &State, target_count: u32, cache: &mut PredicateCache<'_>) -> FitnessBreakdown {
    let placements: Vec<&Placement> = state.placements.iter().collect();
    let mutation_count = placements.len();

    let shared_crop_count = state.crops.shared_count();
    let total_crops = state.crops.len();

    let mut total_distance: u32 = 0;
    let mut distance_pairs: u32 = 0;
    for i in 0..placements.len() {
        let Some(p_i) = placements.get(i) else { continue };
        for j in (i + 1)..placements.len() {
            let Some(p_j) = placements.get(j) else { continue };
            let a = p_i.footprint.center();
            let b = p_j.footprint.center();
            total_distance += a.manhattan(b) as u32;
            distance_pairs += 1;
        }
    }

    let mut synergy_count: u32 = 0;
    for a in &placements {
        if !cache.has_spread(&a.mutation_id) {
            continue;
        }
        for b in &placements {
            if std::ptr::eq(*a, *b) {
                continue;
            }
            if !cache.is_only_positive(&b.mutation_id) {
                continue;
            }
            let dist = a.footprint.center().manhattan(b.footprint.center());
            if dist <= 3 {
                synergy_count += 1;
            }
        }
    }

    let avg_distance = if distance_pairs == 0 {
        0.0
    } else {
        total_distance as f64 / distance_pairs as f64
    };
    let placement_rate = if target_count == 0 {
        1.0
    } else {
        mutation_count as f64 / target_count as f64
    };

    let score = placement_rate * 2000.0
        + (200.0 - 10.0 * avg_distance).max(0.0)
        + 30.0 * shared_crop_count as f64
        + 20.0 * synergy_count as f64
        - 3000.0 * (target_count as f64 - mutation_count as f64);

    FitnessBreakdown {
        mutation_count,
        shared_crop_count,
        total_crops,
        total_distance,
        distance_pairs,
        synergy_count,
        score,
    }
}

