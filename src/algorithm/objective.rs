//! Objective-driven alternative loop: maximize a scalar over a free pool
//!
//! Spec §4.12's second entry point: rather than satisfying a fixed workload,
//! the caller hands over an allowed pool of mutation ids and a scalar
//! objective to maximize. Mirrors the teacher's own `algorithm::anneal`
//! Metropolis shape (single RNG, accept/reject, running best-seen state) but
//! the neighbor moves are `ADD`/`REMOVE`/`MOVE`/`SWAP` over a free pool
//! instead of a fixed-workload relocate/swap pair.

use crate::algorithm::feasibility::check_feasibility;
use crate::algorithm::placer;
use crate::catalog::{Catalog, MutationId, ParsedMutation};
use crate::io::error::LayoutOutcome;
use crate::io::progress::{AbortSignal, ProgressReport, cadence};
use crate::spatial::{Cell, Placement, State};
use rand::Rng;
use rand::rngs::StdRng;

/// Which scalar the objective-driven alternative loop maximizes, spec §4.12.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    /// `Σ (1 + 0.25*tier + 0.1*area)` over placed instances.
    MaxCount,
    /// `Σ (0.01*Σdrop_amount + Σeffect_weight + 10*tier)` over placed instances.
    MaxProfit,
}

/// Objective-mode run configuration, spec §4.12. The iteration/temperature/
/// cooling triple comes from one of the `io::configuration` presets;
/// `objective` is chosen independently by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Iteration budget for one run (or one batch, in infinite mode).
    pub max_iterations: u32,
    /// Starting temperature.
    pub start_temperature: f64,
    /// Multiplicative cooling ratio applied each iteration.
    pub cooling_rate: f64,
    /// Which scalar to maximize.
    pub objective: Objective,
}

/// One recorded point of the run's score/temperature history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryPoint {
    /// Iteration number.
    pub iter: u32,
    /// Scalar score at that iteration.
    pub score: f64,
    /// Temperature at that iteration.
    pub temperature: f64,
}

/// Outcome of a completed objective-mode run.
pub struct LayoutResult {
    /// Final state (best-seen, not necessarily the last accepted state).
    pub state: State,
    /// Iterations actually run before stopping.
    pub iterations: u32,
    /// Scalar score of the last accepted state.
    pub final_score: f64,
    /// Scalar score of `state`.
    pub best_score: f64,
    /// Recorded `(iter, score, temperature)` points, one per progress cadence.
    pub history: Vec<HistoryPoint>,
    /// Why the run stopped.
    pub outcome: LayoutOutcome,
}

fn tier_weight(mutation: &ParsedMutation) -> f64 {
    1.0 + 0.5 * f64::from(mutation.tier())
}

fn count_value(mutation: &ParsedMutation) -> f64 {
    1.0 + 0.25 * f64::from(mutation.tier()) + 0.1 * f64::from(mutation.area())
}

fn profit_value(mutation: &ParsedMutation, catalog: &Catalog) -> f64 {
    let drop_total: f64 = catalog
        .raw(&mutation.id)
        .map(|raw| raw.drops.values().sum())
        .unwrap_or(0.0);
    let effect_total: f64 = mutation
        .effects
        .iter()
        .map(|e| crate::catalog::effects::profit_weight(e))
        .sum();
    0.01 * drop_total + effect_total + 10.0 * f64::from(mutation.tier())
}

/// Score a single placement under `objective`. Used both by the objective
/// loop's acceptance test and by the greedy seed's tier-sort tiebreak.
fn placement_value(mutation: &ParsedMutation, catalog: &Catalog, objective: Objective) -> f64 {
    match objective {
        Objective::MaxCount => count_value(mutation),
        Objective::MaxProfit => profit_value(mutation, catalog),
    }
}

fn total_score(state: &State, catalog: &mut Catalog, available_ids: &[MutationId], objective: Objective) -> f64 {
    let placements: Vec<Placement> = state.placements.iter().cloned().collect();
    let mut total = 0.0;
    for placement in &placements {
        if let Ok(mutation) = catalog.parse_cached(&placement.mutation_id, available_ids) {
            total += placement_value(&mutation.clone(), catalog, objective);
        }
    }
    total
}

/// Build the allowed pool filtered per spec §4.12: drop ids with an
/// unsatisfiable `special` condition, and drop ids whose dep requirements
/// cannot possibly be satisfied by anything else in the pool.
fn filter_pool(
    allowed_ids: &[MutationId],
    catalog: &mut Catalog,
) -> Vec<MutationId> {
    let all = allowed_ids.to_vec();
    let mut parsed: Vec<(MutationId, ParsedMutation)> = Vec::new();
    for id in &all {
        if let Ok(mutation) = catalog.parse_cached(id, &all) {
            if !mutation.has_special_condition {
                parsed.push((id.clone(), mutation.clone()));
            }
        }
    }
    let available: Vec<MutationId> = parsed.iter().map(|(id, _)| id.clone()).collect();
    parsed
        .into_iter()
        .filter(|(_, mutation)| mutation.deps.keys().all(|dep| available.contains(dep)))
        .map(|(id, _)| id)
        .collect()
}

/// Greedy seed: place only crop-only mutations (no dep requirement), sorted
/// tier-descending, smaller-first within ties when `objective` is count-
/// maximizing (spec §4.12).
fn greedy_seed(
    unlocked: &[Cell],
    catalog: &mut Catalog,
    pool: &[MutationId],
    objective: Objective,
    rng: &mut StdRng,
) -> State {
    let mut state = State::new(unlocked);

    let mut candidates: Vec<(MutationId, ParsedMutation)> = pool
        .iter()
        .filter_map(|id| catalog.parse_cached(id, pool).ok().map(|m| (id.clone(), m.clone())))
        .filter(|(_, m)| m.deps.is_empty())
        .collect();

    candidates.sort_by(|(_, a), (_, b)| {
        let tier_cmp = b.tier().cmp(&a.tier());
        if tier_cmp != std::cmp::Ordering::Equal {
            return tier_cmp;
        }
        if matches!(objective, Objective::MaxCount) {
            a.area().cmp(&b.area())
        } else {
            std::cmp::Ordering::Equal
        }
    });

    for (id, mutation) in candidates {
        let mut anchors: Vec<Cell> = (0..crate::spatial::BOARD_SIZE as u8)
            .flat_map(|y| (0..crate::spatial::BOARD_SIZE as u8).map(move |x| Cell::new(x, y)))
            .collect();
        shuffle(&mut anchors, rng);

        for anchor in anchors {
            if let Some(feasible) = check_feasibility(&state, &mutation, anchor) {
                let instance_id = state.placements.next_instance_id(&id);
                placer::execute(&mut state, &mutation, &feasible, instance_id);
                break;
            }
        }
    }

    state
}

fn shuffle<T>(items: &mut [T], rng: &mut StdRng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

fn try_add(state: &State, catalog: &mut Catalog, pool: &[MutationId], rng: &mut StdRng) -> Option<State> {
    let weighted: Vec<(MutationId, f64)> = pool
        .iter()
        .filter_map(|id| {
            catalog
                .parse_cached(id, pool)
                .ok()
                .map(|m| (id.clone(), tier_weight(m)))
        })
        .collect();
    if weighted.is_empty() {
        return None;
    }
    let total_weight: f64 = weighted.iter().map(|(_, w)| w).sum();
    let mut pick = rng.random_range(0.0..total_weight.max(f64::MIN_POSITIVE));
    let mut chosen_id = weighted.first().map(|(id, _)| id.clone())?;
    for (id, weight) in &weighted {
        if pick < *weight {
            chosen_id = id.clone();
            break;
        }
        pick -= weight;
    }

    let mutation = catalog.parse_cached(&chosen_id, pool).ok()?.clone();
    let mut anchors: Vec<Cell> = (0..crate::spatial::BOARD_SIZE as u8)
        .flat_map(|y| (0..crate::spatial::BOARD_SIZE as u8).map(move |x| Cell::new(x, y)))
        .collect();
    shuffle(&mut anchors, rng);

    for anchor in anchors {
        if let Some(feasible) = check_feasibility(state, &mutation, anchor) {
            let mut next = state.clone();
            let instance_id = next.placements.next_instance_id(&chosen_id);
            placer::execute(&mut next, &mutation, &feasible, instance_id);
            return Some(next);
        }
    }
    None
}

fn try_remove(state: &State, rng: &mut StdRng) -> Option<State> {
    let ids: Vec<String> = state.placements.iter().map(|p| p.instance_id.clone()).collect();
    if ids.is_empty() {
        return None;
    }
    let chosen = ids.get(rng.random_range(0..ids.len()))?;
    let mut next = state.clone();
    placer::remove(&mut next, chosen);
    Some(next)
}

fn try_move(state: &State, catalog: &mut Catalog, pool: &[MutationId], rng: &mut StdRng) -> Option<State> {
    let placements: Vec<Placement> = state.placements.iter().cloned().collect();
    if placements.is_empty() {
        return None;
    }
    let chosen = placements.get(rng.random_range(0..placements.len()))?;

    let mut without = state.clone();
    placer::remove(&mut without, &chosen.instance_id);

    let mutation = catalog.parse_cached(&chosen.mutation_id, pool).ok()?.clone();
    let mut anchors: Vec<Cell> = (0..crate::spatial::BOARD_SIZE as u8)
        .flat_map(|y| (0..crate::spatial::BOARD_SIZE as u8).map(move |x| Cell::new(x, y)))
        .collect();
    shuffle(&mut anchors, rng);

    for anchor in anchors {
        if let Some(feasible) = check_feasibility(&without, &mutation, anchor) {
            let mut next = without;
            placer::execute(&mut next, &mutation, &feasible, chosen.instance_id.clone());
            return Some(next);
        }
    }
    None
}

/// Replace a random placement with a same-size mutation drawn from `pool`,
/// at the same anchor. Snapshots crops before the move (spec §9's pinned
/// decision) so a failed replacement rolls back to an identical state rather
/// than one whose crop configuration drifted.
fn try_swap(state: &State, catalog: &mut Catalog, pool: &[MutationId], rng: &mut StdRng) -> Option<State> {
    let placements: Vec<Placement> = state.placements.iter().cloned().collect();
    if placements.is_empty() {
        return None;
    }
    let chosen = placements.get(rng.random_range(0..placements.len()))?;
    let original_mutation = catalog.parse_cached(&chosen.mutation_id, pool).ok()?.clone();

    let same_size: Vec<MutationId> = pool
        .iter()
        .filter(|id| {
            catalog
                .parse_cached(id, pool)
                .is_ok_and(|m| m.footprint == original_mutation.footprint && m.id != chosen.mutation_id)
        })
        .cloned()
        .collect();
    if same_size.is_empty() {
        return None;
    }
    let replacement_id = same_size.get(rng.random_range(0..same_size.len()))?.clone();

    let snapshot = state.clone();
    let mut next = state.clone();
    placer::remove(&mut next, &chosen.instance_id);

    let replacement = catalog.parse_cached(&replacement_id, pool).ok()?.clone();
    let Some(feasible) = check_feasibility(&next, &replacement, chosen.footprint.anchor) else {
        return Some(snapshot);
    };
    placer::execute(&mut next, &replacement, &feasible, chosen.instance_id.clone());
    Some(next)
}

/// Remove any placement whose invariants have drifted from a single
/// relocate/swap step gone wrong: overlapping footprints, a crop whose
/// serving set doesn't include it, or an unsatisfied dep count. Spec §4.12's
/// closing "final validation pass".
fn validate(state: &mut State, catalog: &mut Catalog, pool: &[MutationId]) {
    let placements: Vec<Placement> = state.placements.iter().cloned().collect();
    for placement in placements {
        let Ok(mutation) = catalog.parse_cached(&placement.mutation_id, pool) else {
            placer::remove(state, &placement.instance_id);
            continue;
        };
        let mutation = mutation.clone();
        let still_feasible = check_feasibility_in_place(state, &mutation, &placement);
        if !still_feasible {
            placer::remove(state, &placement.instance_id);
        }
    }
}

fn check_feasibility_in_place(state: &State, mutation: &ParsedMutation, placement: &Placement) -> bool {
    for (cell, crop_kind) in &placement.crops {
        match state.crops.get(*cell) {
            Some(record) if &record.crop == crop_kind && record.serving.contains_key(&placement.instance_id) => {}
            _ => return false,
        }
    }
    for (dep, &required) in &mutation.deps {
        let have = state
            .placements
            .distinct_instances_of_kind_in(&placement.footprint.ring(), dep)
            .len() as u32;
        if have < required {
            return false;
        }
    }
    true
}

/// Run the objective-driven alternative loop over `allowed_ids`, maximizing
/// `config.objective` via Metropolis acceptance over `ADD`/`REMOVE`/`MOVE`/
/// `SWAP` neighbor moves (spec §4.12).
#[allow(clippy::too_many_arguments)]
pub fn optimize_layout(
    unlocked: &[Cell],
    allowed_ids: &[MutationId],
    catalog: &mut Catalog,
    config: &LayoutConfig,
    rng: &mut StdRng,
    mut progress: impl FnMut(ProgressReport),
    abort: &AbortSignal,
) -> LayoutResult {
    let pool = filter_pool(allowed_ids, catalog);
    if pool.is_empty() {
        return LayoutResult {
            state: State::new(unlocked),
            iterations: 0,
            final_score: 0.0,
            best_score: 0.0,
            history: Vec::new(),
            outcome: LayoutOutcome::AllSpecial,
        };
    }

    let mut current = greedy_seed(unlocked, catalog, &pool, config.objective, rng);
    let mut current_score = total_score(&current, catalog, &pool, config.objective);
    let mut best = current.clone();
    let mut best_score = current_score;

    let mut temperature = config.start_temperature;
    let report_every = cadence(config.max_iterations);
    let mut history = Vec::new();
    let mut iterations_run = 0u32;
    let mut outcome = LayoutOutcome::Completed;

    for iter in 1..=config.max_iterations {
        iterations_run = iter;
        let roll: f64 = rng.random_range(0.0..1.0);
        let candidate = if roll < 0.4 {
            try_add(&current, catalog, &pool, rng)
        } else if roll < 0.6 {
            try_remove(&current, rng)
        } else if roll < 0.85 {
            try_move(&current, catalog, &pool, rng)
        } else {
            try_swap(&current, catalog, &pool, rng)
        };

        if let Some(mut next_state) = candidate {
            validate(&mut next_state, catalog, &pool);
            let next_score = total_score(&next_state, catalog, &pool, config.objective);
            let delta = next_score - current_score;
            let accept = delta > 0.0
                || rng.random_bool((delta / temperature.max(f64::MIN_POSITIVE)).exp().clamp(0.0, 1.0));
            if accept {
                current = next_state;
                current_score = next_score;
                if current_score > best_score {
                    best = current.clone();
                    best_score = current_score;
                }
            }
        }

        temperature *= config.cooling_rate;

        if iter % report_every == 0 {
            history.push(HistoryPoint {
                iter,
                score: current_score,
                temperature,
            });
            progress(ProgressReport {
                iter,
                max_iter: config.max_iterations,
                current_score,
                best_score,
                temperature,
                placed_count: current.placement_count(),
            });
            if abort.is_aborted() {
                outcome = LayoutOutcome::Cancelled;
                break;
            }
        }
    }

    LayoutResult {
        state: best,
        iterations: iterations_run,
        final_score: current_score,
        best_score,
        history,
        outcome,
    }
}

