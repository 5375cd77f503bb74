//! Population-based refinement: greedy seeds, tournament selection, positional crossover
//!
//! The teacher has no population, crossover or multi-candidate generational
//! search of any kind; `GreedyStochastic` builds exactly one grid per run.
//! Tournament selection reuses `RandomSelector::weighted_choice`'s idiom of a
//! stochastic pick weighted by fitness rather than always taking the single
//! best, but the population loop, elitism and crossover/mutation operators
//! here are this engine's own.

use crate::algorithm::feasibility::{check_feasibility, enumerate_feasible};
use crate::algorithm::placer;
use crate::algorithm::scorer::{StrategyProfile, score_placement};
use crate::analysis::fitness::{self, PredicateCache};
use crate::analysis::profiles::GA_SEED_RANDOMNESS;
use crate::catalog::{Catalog, MutationId};
use crate::spatial::{Cell, Placement, State};
use rand::Rng;
use rand::rngs::StdRng;

/// Genetic optimizer tuning knobs, spec §4.10.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaConfig {
    /// Population size.
    pub population: usize,
    /// Number of generations to run.
    pub generations: usize,
    /// Number of top chromosomes carried over unchanged each generation.
    pub elite: usize,
    /// Probability of performing crossover vs. cloning a parent.
    pub crossover_rate: f64,
    /// Probability of mutating a child after crossover.
    pub mutation_rate: f64,
    /// Tournament size for parent selection.
    pub tournament_size: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population: 8,
            generations: 15,
            elite: 2,
            crossover_rate: 0.7,
            mutation_rate: 0.3,
            tournament_size: 3,
        }
    }
}

/// Run the genetic optimizer over `workload`, returning its best chromosome
/// (spec §4.10). The caller is expected to refine the result with
/// `algorithm::annealing::anneal` afterward.
pub fn run(
    unlocked: &[Cell],
    catalog: &mut Catalog,
    available_ids: &[MutationId],
    workload: &[(MutationId, u32)],
    profile: &StrategyProfile,
    config: &GaConfig,
    target_count: u32,
    rng: &mut StdRng,
) -> State {
    let mut population: Vec<State> = GA_SEED_RANDOMNESS
        .iter()
        .take(config.population)
        .map(|&randomness| {
            let seed_profile = StrategyProfile {
                randomness,
                ..*profile
            };
            crate::algorithm::greedy::solve(unlocked, catalog, available_ids, workload, &seed_profile, rng)
        })
        .collect();

    for _generation in 0..config.generations {
        let mut cache = PredicateCache::new(catalog, available_ids.to_vec());
        let mut scored: Vec<(f64, usize)> = population
            .iter()
            .enumerate()
            .map(|(idx, state)| (fitness::evaluate(state, target_count, &mut cache).score, idx))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut next_gen: Vec<State> = scored
            .iter()
            .take(config.elite)
            .filter_map(|&(_, idx)| population.get(idx).cloned())
            .collect();

        while next_gen.len() < config.population {
            let Some(parent_a) = population.get(tournament_select(&scored, config.tournament_size, rng)) else {
                break;
            };
            let parent_b_idx = tournament_select(&scored, config.tournament_size, rng);
            let child = if rng.random_bool(config.crossover_rate) && population.get(parent_b_idx).is_some() {
                let parent_b = population.get(parent_b_idx).unwrap_or(parent_a);
                crossover(parent_a, parent_b, unlocked, catalog, available_ids, profile)
            } else {
                parent_a.clone()
            };
            let child = if rng.random_bool(config.mutation_rate) {
                mutate(child, catalog, available_ids, profile, rng)
            } else {
                child
            };
            next_gen.push(child);
        }

        population = next_gen;
    }

    let mut cache = PredicateCache::new(catalog, available_ids.to_vec());
    population
        .into_iter()
        .max_by(|a, b| {
            let score_a = fitness::evaluate(a, target_count, &mut cache).score;
            let score_b = fitness::evaluate(b, target_count, &mut cache).score;
            score_a.partial_cmp(&score_b).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_else(|| State::new(unlocked))
}

fn tournament_select(scored: &[(f64, usize)], tournament_size: usize, rng: &mut StdRng) -> usize {
    let mut best: Option<(f64, usize)> = None;
    for _ in 0..tournament_size.max(1) {
        let Some(&(score, idx)) = scored.get(rng.random_range(0..scored.len())) else {
            continue;
        };
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, idx));
        }
    }
    best.map_or(0, |(_, idx)| idx)
}

/// Positional crossover: walk parent-1's placement order; for each instance,
/// try parent-2's anchor first, then parent-1's, else any feasible anchor;
/// score each option and keep the best.
fn crossover(
    parent_a: &State,
    parent_b: &State,
    unlocked: &[Cell],
    catalog: &mut Catalog,
    available_ids: &[MutationId],
    profile: &StrategyProfile,
) -> State {
    let mut child = State::new(unlocked);
    let a_placements: Vec<&Placement> = parent_a.placements.iter().collect();

    for placement in a_placements {
        let Ok(mutation) = catalog.parse_cached(&placement.mutation_id, available_ids) else {
            continue;
        };
        let mutation = mutation.clone();
        let tier = i64::from(mutation.tier());

        let b_anchor = parent_b
            .placements
            .at_cell(placement.footprint.anchor)
            .filter(|p| p.mutation_id == placement.mutation_id)
            .map(|_| placement.footprint.anchor);

        let mut options = Vec::new();
        if let Some(anchor) = b_anchor {
            if let Some(feasible) = check_feasibility(&child, &mutation, anchor) {
                options.push(feasible);
            }
        }
        if let Some(feasible) = check_feasibility(&child, &mutation, placement.footprint.anchor) {
            options.push(feasible);
        }
        if options.is_empty() {
            options = enumerate_feasible(&child, &mutation);
        }
        if options.is_empty() {
            continue;
        }

        let mut effects_by_id = std::collections::HashMap::new();
        for placed in child.placements.iter() {
            if effects_by_id.contains_key(&placed.mutation_id) {
                continue;
            }
            if let Ok(parsed) = catalog.parse_cached(&placed.mutation_id, available_ids) {
                effects_by_id.insert(placed.mutation_id.clone(), parsed.effects.clone());
            }
        }
        let effects_of = |id: &str| effects_by_id.get(id).cloned();

        let Some(best) = options.into_iter().max_by(|a, b| {
            let score_a = score_placement(&child, &mutation, a, profile, tier, &effects_of);
            let score_b = score_placement(&child, &mutation, b, profile, tier, &effects_of);
            score_a.partial_cmp(&score_b).unwrap_or(std::cmp::Ordering::Equal)
        }) else {
            continue;
        };

        let instance_id = child.placements.next_instance_id(&placement.mutation_id);
        placer::execute(&mut child, &mutation, &best, instance_id);
    }

    child
}

/// Remove one random placement, then re-place it at a uniformly-chosen
/// top-5 feasible anchor.
fn mutate(
    mut state: State,
    catalog: &mut Catalog,
    available_ids: &[MutationId],
    profile: &StrategyProfile,
    rng: &mut StdRng,
) -> State {
    let ids: Vec<String> = state.placements.iter().map(|p| p.instance_id.clone()).collect();
    if ids.is_empty() {
        return state;
    }
    let Some(chosen) = ids.get(rng.random_range(0..ids.len())) else {
        return state;
    };
    let Some(removed) = placer::remove(&mut state, chosen) else {
        return state;
    };

    let Ok(mutation) = catalog.parse_cached(&removed.mutation_id, available_ids) else {
        return state;
    };
    let mutation = mutation.clone();
    let tier = i64::from(mutation.tier());

    let mut candidates = enumerate_feasible(&state, &mutation);
    if candidates.is_empty() {
        return state;
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
        let score_a = score_placement(&state, &mutation, a, profile, tier, &effects_of);
        let score_b = score_placement(&state, &mutation, b, profile, tier, &effects_of);
        score_b.partial_cmp(&score_a).unwrap_or(std::cmp::Ordering::Equal)
    });
    let top_k = candidates.len().min(5);
    let idx = rng.random_range(0..top_k);
    let Some(picked) = candidates.get(idx).cloned() else {
        return state;
    };

    placer::execute(&mut state, &mutation, &picked, removed.instance_id);
    state
}
