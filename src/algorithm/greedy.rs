//! Priority-ordered greedy instance placement
//!
//! Mirrors the teacher's `GreedyStochastic::get_placement_decision` /
//! `select_random_position`: score every live candidate, narrow to a top-k
//! pool, then make a single weighted pick. Here the whole workload is sorted
//! by priority up front and each instance is placed at its own best-scoring
//! anchor, one at a time, rather than picking one cell across the whole
//! board per step.

use crate::algorithm::feasibility::enumerate_feasible;
use crate::algorithm::placer;
use crate::algorithm::scorer::{StrategyProfile, score_placement};
use crate::catalog::{Catalog, MutationId};
use crate::spatial::{Cell, State};
use rand::Rng;
use rand::rngs::StdRng;

/// One `(mutationId, quantity)` pair from the caller's requested workload.
pub type WorkloadEntry = (MutationId, u32);

/// Expand a workload into one ordered instance list, sorted by priority
/// `area*100 + tier*10 + (isolated?0:1)` descending (spec §4.6 step 1).
///
/// Ties within identical `(mutation_id, priority)` preserve workload order,
/// since `sort_by_key` is stable and the expansion itself is emitted in
/// workload order.
pub fn ordered_instances(
    workload: &[WorkloadEntry],
    catalog: &mut Catalog,
    available_ids: &[MutationId],
) -> Vec<MutationId> {
    let mut expanded = Vec::new();
    for (mutation_id, quantity) in workload {
        for _ in 0..*quantity {
            expanded.push(mutation_id.clone());
        }
    }

    let mut priorities = std::collections::HashMap::new();
    for id in &expanded {
        if priorities.contains_key(id) {
            continue;
        }
        if let Ok(parsed) = catalog.parse_cached(id, available_ids) {
            let priority = parsed.area() as i64 * 100
                + parsed.tier() as i64 * 10
                + i64::from(!parsed.isolated);
            priorities.insert(id.clone(), priority);
        }
    }

    expanded.sort_by_key(|id| std::cmp::Reverse(priorities.get(id).copied().unwrap_or(0)));
    expanded
}

/// Run `GreedySolver` over `workload`, building a fresh `State` from
/// `unlocked`. Instances whose mutation id fails to parse, or that find no
/// feasible anchor, are silently skipped (spec §4.6).
pub fn solve(
    unlocked: &[Cell],
    catalog: &mut Catalog,
    available_ids: &[MutationId],
    workload: &[WorkloadEntry],
    profile: &StrategyProfile,
    rng: &mut StdRng,
) -> State {
    let mut state = State::new(unlocked);
    let instances = ordered_instances(workload, catalog, available_ids);
    place_ordered(&mut state, catalog, available_ids, &instances, profile, rng);
    state
}

/// Place each mutation id in `instances`, in order, into an already-built
/// `state`. Shared by `GreedySolver::solve` and `BulkPlacer`'s non-dominant
/// workload remainder (spec §4.6, §4.7). Returns the number of instances
/// successfully placed.
pub fn place_ordered(
    state: &mut State,
    catalog: &mut Catalog,
    available_ids: &[MutationId],
    instances: &[MutationId],
    profile: &StrategyProfile,
    rng: &mut StdRng,
) -> usize {
    let mut placed = 0;

    for mutation_id in instances {
        let Ok(mutation) = catalog.parse_cached(mutation_id, available_ids) else {
            continue;
        };
        if mutation.has_special_condition {
            continue;
        }
        let mutation = mutation.clone();
        let tier = i64::from(mutation.tier());

        let mut candidates = enumerate_feasible(state, &mutation);
        if candidates.is_empty() {
            continue;
        }

        let mut effects_by_id = std::collections::HashMap::new();
        for placed in state.placements.iter() {
            if effects_by_id.contains_key(&placed.mutation_id) {
                continue;
            }
            if let Ok(parsed) = catalog.parse_cached(&placed.mutation_id, available_ids) {
                effects_by_id.insert(placed.mutation_id.clone(), parsed.effects.clone());
            }
        }

        let effects_of = |id: &str| effects_by_id.get(id).cloned();
        candidates.sort_by(|a, b| {
            let score_a = score_placement(state, &mutation, a, profile, tier, &effects_of);
            let score_b = score_placement(state, &mutation, b, profile, tier, &effects_of);
            score_b
                .partial_cmp(&score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let chosen = if profile.randomness > 0.0 && rng.random_bool(profile.randomness) {
            let top_k = candidates.len().min(3);
            let idx = rng.random_range(0..top_k);
            candidates.get(idx)
        } else {
            candidates.first()
        };
        let Some(chosen) = chosen.cloned() else {
            continue;
        };

        let instance_id = state.placements.next_instance_id(mutation_id);
        placer::execute(state, &mutation, &chosen, instance_id);
        placed += 1;
    }

    placed
}

