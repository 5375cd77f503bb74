//! Heuristic scoring of a candidate placement during construction/move search
//!
//! Mirrors the teacher's `calculate_position_selection`, which combines an
//! adjacency score, an entropy-like term and a density-deviation bias into
//! one weighted position score rather than trusting any single factor,
//! adapted to this engine's compactness/sharing/synergy/corner terms.

use crate::algorithm::feasibility::FeasiblePlacement;
use crate::catalog::{ParsedMutation, effects};
use crate::spatial::{BOARD_SIZE, Placement, State};

/// Weight tuple driving `PlacementScorer`, one instance per named strategy
/// profile (spec §4.11).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrategyProfile {
    /// Weight applied to the sharing term.
    pub sharing_weight: f64,
    /// Weight applied to the compactness term.
    pub compactness_weight: f64,
    /// Weight applied to the synergy term.
    pub synergy_weight: f64,
    /// Weight applied to the corner term.
    pub corner_weight: f64,
    /// Bernoulli probability of picking from the top-k candidates instead of
    /// the single best, consulted by the solvers, not this scorer.
    pub randomness: f64,
}

/// Score a feasible placement of `mutation` against the current `state`
/// using `profile`'s weights. `tier` is a caller-supplied priority tier
/// (spec §4.5's `+3*tier` term); callers that have no tiering concept may
/// pass `0`. `effects_of` resolves a placed instance's mutation id to its
/// effect set, so the synergy term can see other placements' tags without
/// the scorer owning a catalog reference itself.
pub fn score_placement<F>(
    state: &State,
    mutation: &ParsedMutation,
    feasible: &FeasiblePlacement,
    profile: &StrategyProfile,
    tier: i64,
    effects_of: F,
) -> f64
where
    F: Fn(&str) -> Option<std::collections::BTreeSet<String>>,
{
    let mut score = 0.0;

    score += compactness_term(state, feasible, profile);
    score += sharing_term(feasible, profile);
    score += synergy_term(state, mutation, feasible, profile, effects_of);
    score += corner_term(mutation, feasible, profile);
    score += 3.0 * tier as f64;

    score
}

fn compactness_term(state: &State, feasible: &FeasiblePlacement, profile: &StrategyProfile) -> f64 {
    let existing: Vec<&Placement> = state.placements.iter().collect();
    if existing.is_empty() {
        let board_center = (BOARD_SIZE as f64 - 1.0) / 2.0;
        let center = feasible.footprint.center();
        let center_dist =
            (center.x as f64 - board_center).abs() + (center.y as f64 - board_center).abs();
        return (50.0 - 5.0 * center_dist).max(0.0) * profile.compactness_weight;
    }

    let new_center = feasible.footprint.center();
    let sum_x: f64 = existing.iter().map(|p| p.footprint.center().x as f64).sum();
    let sum_y: f64 = existing.iter().map(|p| p.footprint.center().y as f64).sum();
    let n = existing.len() as f64;
    let centroid_x = sum_x / n;
    let centroid_y = sum_y / n;
    let dist = (new_center.x as f64 - centroid_x).abs() + (new_center.y as f64 - centroid_y).abs();

    let mut term = (100.0 - 8.0 * dist).max(0.0) * profile.compactness_weight;

    for placement in &existing {
        if rect_distance(feasible.footprint, placement.footprint) <= 1 {
            term += 30.0 * profile.compactness_weight;
        }
    }

    term
}

fn rect_distance(a: crate::spatial::Footprint, b: crate::spatial::Footprint) -> i32 {
    let ax1 = a.anchor.x as i32;
    let ay1 = a.anchor.y as i32;
    let ax2 = ax1 + a.width as i32 - 1;
    let ay2 = ay1 + a.height as i32 - 1;
    let bx1 = b.anchor.x as i32;
    let by1 = b.anchor.y as i32;
    let bx2 = bx1 + b.width as i32 - 1;
    let by2 = by1 + b.height as i32 - 1;

    let dx = if ax2 < bx1 {
        bx1 - ax2
    } else if bx2 < ax1 {
        ax1 - bx2
    } else {
        0
    };
    let dy = if ay2 < by1 {
        by1 - ay2
    } else if by2 < ay1 {
        ay1 - by2
    } else {
        0
    };
    dx.max(dy)
}

fn sharing_term(feasible: &FeasiblePlacement, profile: &StrategyProfile) -> f64 {
    let count: usize = feasible.satisfied_crops.values().map(Vec::len).sum();
    count as f64 * profile.sharing_weight * 30.0
}

fn synergy_term<F>(
    state: &State,
    mutation: &ParsedMutation,
    feasible: &FeasiblePlacement,
    profile: &StrategyProfile,
    effects_of: F,
) -> f64
where
    F: Fn(&str) -> Option<std::collections::BTreeSet<String>>,
{
    if !effects::has_spread_effect(&mutation.effects) {
        return 0.0;
    }

    let mut term = 0.0;
    let new_center = feasible.footprint.center();
    for placement in state.placements.iter() {
        let dist = new_center.manhattan(placement.footprint.center());
        if dist > 3 {
            continue;
        }
        let Some(other) = effects_of(&placement.mutation_id) else {
            continue;
        };
        if effects::has_only_positive_effect(&other) {
            term += (4.0 - dist as f64) * profile.synergy_weight * 5.0;
        }
    }
    term
}

fn corner_term(mutation: &ParsedMutation, feasible: &FeasiblePlacement, profile: &StrategyProfile) -> f64 {
    if !mutation.isolated {
        return 0.0;
    }
    let anchor = feasible.footprint.anchor;
    let on_edge_x = anchor.x == 0 || (anchor.x as usize + feasible.footprint.width as usize) == BOARD_SIZE;
    let on_edge_y = anchor.y == 0 || (anchor.y as usize + feasible.footprint.height as usize) == BOARD_SIZE;
    let mut score = 0.0;
    if on_edge_x {
        score += profile.corner_weight * 20.0;
    }
    if on_edge_y {
        score += profile.corner_weight * 20.0;
    }
    score
}
