//! Adaptive-cooling simulated annealing over a constructed `State`
//!
//! The teacher has no accept/reject search loop of its own; the closest real
//! analogue is `deadlock::resolve_spatial_deadlock`'s adaptive-radius
//! escalation on repeated failure, which this module's reheat-on-idle
//! behavior echoes, and `RandomSelector`'s weighted choice, reused here for
//! move selection. The Metropolis accept/reject criterion, tabu list and
//! cooling schedule are this engine's own, built for the relocate/swap
//! neighbor moves and tabu/reheat schedule.

use crate::analysis::fitness::{self, PredicateCache};
use crate::algorithm::feasibility::enumerate_feasible;
use crate::algorithm::placer;
use crate::algorithm::scorer::{StrategyProfile, score_placement};
use crate::catalog::{Catalog, MutationId};
use crate::io::progress::{AbortSignal, ProgressReport, cadence};
use crate::spatial::{Cell, Placement, State};
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// Simulated annealing tuning knobs, spec §4.8.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaConfig {
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Temperature floor; the run stops cooling below this.
    pub floor_temperature: f64,
    /// Metropolis iterations attempted per temperature step.
    pub iterations_per_step: u32,
    /// Base multiplicative cooling ratio applied each step.
    pub base_cooling_ratio: f64,
    /// Idle-iteration count that triggers a reheat.
    pub reheat_idle_threshold: u32,
    /// Multiplicative factor applied to `initial_temperature` on reheat.
    pub reheat_factor: f64,
    /// Maximum number of reheats across a single run.
    pub max_reheats: u32,
    /// Idle-iteration count (with no reheats remaining) that ends the run.
    pub convergence_idle_threshold: u32,
    /// Maximum live tabu entries.
    pub tabu_capacity: usize,
    /// Probability of a swap move vs. a relocate move when ≥2 placements exist.
    pub swap_probability: f64,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            floor_temperature: 0.01,
            iterations_per_step: 30,
            base_cooling_ratio: 0.97,
            reheat_idle_threshold: 50,
            reheat_factor: 0.5,
            max_reheats: 3,
            convergence_idle_threshold: 100,
            tabu_capacity: 10,
            swap_probability: 0.3,
        }
    }
}

/// Outcome of a completed anneal run.
pub struct AnnealResult {
    /// Best state encountered across the whole run.
    pub state: State,
    /// That state's fitness score.
    pub score: f64,
}

struct TabuEntry {
    instance_id: MutationId,
    anchor: Cell,
    expires_at: u32,
}

/// Run SA over `initial`, honoring `config`'s tuning knobs. `catalog` and
/// `available_ids` resolve mutation ids during the relocate/swap moves;
/// `target_count` feeds `FitnessCalculator`'s placement-rate term.
///
/// `progress` is invoked at the spec-mandated cadence
/// (`max(1, max_iterations / PROGRESS_CADENCE_DIVISOR)`, here driven by
/// `iterations_per_step` instead since SA has no fixed iteration cap); `abort`
/// is checked at the same cadence and ends the run early, returning the best
/// state found so far.
#[allow(clippy::too_many_arguments)]
pub fn anneal(
    initial: State,
    catalog: &mut Catalog,
    available_ids: &[MutationId],
    target_count: u32,
    config: &SaConfig,
    profile: &StrategyProfile,
    rng: &mut StdRng,
    mut progress: impl FnMut(ProgressReport),
    abort: &AbortSignal,
) -> AnnealResult {
    let mut cache = PredicateCache::new(catalog, available_ids.to_vec());
    let mut current = initial.clone();
    let mut current_score = fitness::evaluate(&current, target_count, &mut cache).score;
    let mut best = current.clone();
    let mut best_score = current_score;

    let mut temperature = config.initial_temperature;
    let mut cooling_ratio = config.base_cooling_ratio;
    let mut idle_iters: u32 = 0;
    let mut reheats: u32 = 0;
    let mut tabu: VecDeque<TabuEntry> = VecDeque::new();
    let mut accepted_in_step: u32 = 0;
    let mut attempted_in_step: u32 = 0;
    let mut iter: u32 = 0;
    let report_every = cadence(config.iterations_per_step.max(1) * 100);

    loop {
        if temperature < config.floor_temperature {
            break;
        }
        if idle_iters >= config.convergence_idle_threshold && reheats >= config.max_reheats {
            break;
        }

        for _ in 0..config.iterations_per_step {
            iter += 1;
            attempted_in_step += 1;

            let move_is_swap = current.placement_count() >= 2 && rng.random_bool(config.swap_probability);

            let candidate = if move_is_swap {
                try_swap_move(&current, catalog, available_ids, &mut tabu, iter, config.tabu_capacity, rng)
            } else {
                try_relocate_move(&current, catalog, available_ids, profile, &mut tabu, iter, config.tabu_capacity, rng)
            };

            if let Some(next_state) = candidate {
                let next_score = fitness::evaluate(&next_state, target_count, &mut cache).score;
                let delta = next_score - current_score;
                let accept = delta > 0.0 || rng.random_bool((delta / temperature.max(f64::MIN_POSITIVE)).exp().clamp(0.0, 1.0));

                if accept {
                    current = next_state;
                    current_score = next_score;
                    accepted_in_step += 1;
                    idle_iters = 0;
                    if current_score > best_score {
                        best = current.clone();
                        best_score = current_score;
                    }
                } else {
                    idle_iters += 1;
                }
            } else {
                idle_iters += 1;
            }

            while tabu.front().is_some_and(|e| e.expires_at <= iter) {
                tabu.pop_front();
            }

            if iter % report_every == 0 {
                progress(ProgressReport {
                    iter,
                    max_iter: 0,
                    current_score,
                    best_score,
                    temperature,
                    placed_count: current.placement_count(),
                });
                if abort.is_aborted() {
                    return AnnealResult { state: best, score: best_score };
                }
            }
        }

        if attempted_in_step > 100 {
            accepted_in_step /= 2;
            attempted_in_step /= 2;
        }
        let acceptance_ratio = if attempted_in_step == 0 {
            0.0
        } else {
            accepted_in_step as f64 / attempted_in_step as f64
        };
        let step_ratio = if acceptance_ratio > 0.5 {
            cooling_ratio * 0.98
        } else if acceptance_ratio < 0.1 && temperature > 10.0 * config.floor_temperature {
            cooling_ratio * 1.01
        } else {
            config.base_cooling_ratio
        };
        cooling_ratio = step_ratio;
        temperature *= cooling_ratio;

        if idle_iters >= config.reheat_idle_threshold && reheats < config.max_reheats {
            temperature = config.initial_temperature * config.reheat_factor * 0.7_f64.powi(reheats as i32);
            reheats += 1;
            tabu.clear();
            idle_iters = 0;
            accepted_in_step = 0;
            attempted_in_step = 0;
        }
    }

    AnnealResult { state: best, score: best_score }
}

#[allow(clippy::too_many_arguments)]
fn try_relocate_move(
    current: &State,
    catalog: &mut Catalog,
    available_ids: &[MutationId],
    profile: &StrategyProfile,
    tabu: &mut VecDeque<TabuEntry>,
    iter: u32,
    tabu_capacity: usize,
    rng: &mut StdRng,
) -> Option<State> {
    let placements: Vec<&Placement> = current.placements.iter().collect();
    if placements.is_empty() {
        return None;
    }
    let chosen_idx = rng.random_range(0..placements.len());
    let chosen = placements.get(chosen_idx)?;
    let instance_id = chosen.instance_id.clone();
    let mutation_id = chosen.mutation_id.clone();

    let mut without = current.clone();
    placer::remove(&mut without, &instance_id);

    let mutation = catalog.parse_cached(&mutation_id, available_ids).ok()?.clone();
    let mut candidates = enumerate_feasible(&without, &mutation);
    if candidates.is_empty() {
        return None;
    }

    candidates.retain(|c| {
        !tabu
            .iter()
            .any(|e| e.instance_id == instance_id && e.anchor == c.anchor && e.expires_at > iter)
    });
    if candidates.is_empty() {
        return None;
    }

    let mut effects_by_id = std::collections::HashMap::new();
    for placed in without.placements.iter() {
        if effects_by_id.contains_key(&placed.mutation_id) {
            continue;
        }
        if let Ok(parsed) = catalog.parse_cached(&placed.mutation_id, available_ids) {
            effects_by_id.insert(placed.mutation_id.clone(), parsed.effects.clone());
        }
    }
    let effects_of = |id: &str| effects_by_id.get(id).cloned();

    candidates.sort_by(|a, b| {
        let score_a = score_placement(&without, &mutation, a, profile, i64::from(mutation.tier()), &effects_of);
        let score_b = score_placement(&without, &mutation, b, profile, i64::from(mutation.tier()), &effects_of);
        score_b.partial_cmp(&score_a).unwrap_or(std::cmp::Ordering::Equal)
    });

    let top_k = candidates.len().min(5);
    let idx = rng.random_range(0..top_k);
    let picked = candidates.get(idx)?.clone();

    tabu.push_back(TabuEntry {
        instance_id: instance_id.clone(),
        anchor: picked.anchor,
        expires_at: iter + tabu_capacity as u32,
    });

    let mut result = without;
    placer::execute(&mut result, &mutation, &picked, instance_id);
    Some(result)
}

#[allow(clippy::too_many_arguments)]
fn try_swap_move(
    current: &State,
    catalog: &mut Catalog,
    available_ids: &[MutationId],
    tabu: &mut VecDeque<TabuEntry>,
    iter: u32,
    tabu_capacity: usize,
    rng: &mut StdRng,
) -> Option<State> {
    let placements: Vec<Placement> = current.placements.iter().cloned().collect();
    if placements.len() < 2 {
        return None;
    }

    let mut groups: std::collections::HashMap<(u8, u8), Vec<usize>> = std::collections::HashMap::new();
    for (idx, p) in placements.iter().enumerate() {
        groups
            .entry((p.footprint.width, p.footprint.height))
            .or_default()
            .push(idx);
    }
    let candidate_groups: Vec<&Vec<usize>> = groups.values().filter(|v| v.len() >= 2).collect();
    if candidate_groups.is_empty() {
        return None;
    }
    let group = candidate_groups.get(rng.random_range(0..candidate_groups.len()))?;
    let i = *group.get(rng.random_range(0..group.len()))?;
    let mut j = *group.get(rng.random_range(0..group.len()))?;
    let mut guard = 0;
    while j == i && guard < 8 {
        j = *group.get(rng.random_range(0..group.len()))?;
        guard += 1;
    }
    if j == i {
        return None;
    }

    let a = placements.get(i)?;
    let b = placements.get(j)?;

    if tabu
        .iter()
        .any(|e| (e.instance_id == a.instance_id && e.anchor == b.footprint.anchor && e.expires_at > iter)
            || (e.instance_id == b.instance_id && e.anchor == a.footprint.anchor && e.expires_at > iter))
    {
        return None;
    }

    let mut next = current.clone();
    placer::remove(&mut next, &a.instance_id);
    placer::remove(&mut next, &b.instance_id);

    let mutation_a = catalog.parse_cached(&a.mutation_id, available_ids).ok()?.clone();
    let mutation_b = catalog.parse_cached(&b.mutation_id, available_ids).ok()?.clone();

    let feasible_a_at_b = crate::algorithm::feasibility::check_feasibility(&next, &mutation_a, b.footprint.anchor);
    let Some(feasible_a_at_b) = feasible_a_at_b else {
        return None;
    };
    placer::execute(&mut next, &mutation_a, &feasible_a_at_b, a.instance_id.clone());

    let feasible_b_at_a = crate::algorithm::feasibility::check_feasibility(&next, &mutation_b, a.footprint.anchor);
    let Some(feasible_b_at_a) = feasible_b_at_a else {
        return None;
    };
    placer::execute(&mut next, &mutation_b, &feasible_b_at_a, b.instance_id.clone());

    tabu.push_back(TabuEntry {
        instance_id: a.instance_id.clone(),
        anchor: b.footprint.anchor,
        expires_at: iter + tabu_capacity as u32,
    });
    tabu.push_back(TabuEntry {
        instance_id: b.instance_id.clone(),
        anchor: a.footprint.anchor,
        expires_at: iter + tabu_capacity as u32,
    });

    Some(next)
}
