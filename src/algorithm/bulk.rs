//! Fast path for dominant single-mutation workloads
//!
//! The teacher has no fast-path/dominant-tile shortcut; every run takes the
//! same per-cell weighted-selection path regardless of tile distribution.
//! This module is built to satisfy the eight named crop-pattern layouts
//! directly, reusing `algorithm::greedy`'s anchor-enumeration and placement
//! machinery for the non-pattern remainder.

use crate::algorithm::greedy::{self, WorkloadEntry};
use crate::catalog::{Catalog, CropName, MutationId};
use crate::io::configuration::BULK_DOMINANCE_THRESHOLD;
use crate::spatial::{Cell, State};
use rand::rngs::StdRng;

/// One of the eight regular crop-field layouts `BulkPlacer` tries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Seed every other row.
    AlternatingRows,
    /// Sparse two-column-wide pairs every fourth row, split across two crop kinds.
    SparsePairGrid,
    /// Every other column, split across two crop kinds by row parity.
    MaxDensityPairGrid,
    /// Every third row restricted to even columns, split across two crop kinds.
    ThreeRowOptimalTwoCropGrid,
    /// A uniform grid whose spacing scales with the quantity needed.
    DenseGridWithSpacing,
    /// A diagonal stripe across the board.
    DiagonalStripe,
    /// A horizontal stripe occupying roughly a third of the rows.
    HorizontalStripe,
    /// Alternating cells in both axes.
    Checkerboard,
}

const ALL_PATTERNS: [Pattern; 8] = [
    Pattern::AlternatingRows,
    Pattern::SparsePairGrid,
    Pattern::MaxDensityPairGrid,
    Pattern::ThreeRowOptimalTwoCropGrid,
    Pattern::DenseGridWithSpacing,
    Pattern::DiagonalStripe,
    Pattern::HorizontalStripe,
    Pattern::Checkerboard,
];

/// `true` if `mutation_id` dominates `workload` per spec §4.7's 70% rule and
/// the catalog record for it is a non-isolated 1x1.
pub fn is_bulk_eligible(
    workload: &[WorkloadEntry],
    catalog: &mut Catalog,
    available_ids: &[MutationId],
) -> Option<MutationId> {
    let total: u32 = workload.iter().map(|(_, qty)| *qty).sum();
    if total == 0 {
        return None;
    }
    let (dominant_id, dominant_qty) = workload
        .iter()
        .max_by_key(|(_, qty)| *qty)
        .map(|(id, qty)| (id.clone(), *qty))?;

    if f64::from(dominant_qty) / f64::from(total) < BULK_DOMINANCE_THRESHOLD {
        return None;
    }
    let mutation = catalog.parse_cached(&dominant_id, available_ids).ok()?;
    if mutation.footprint == (1, 1) && !mutation.isolated && !mutation.has_special_condition {
        Some(dominant_id)
    } else {
        None
    }
}

/// `true` for the three named patterns whose documented shape is two crop
/// kinds laid out together rather than one (spec §4.7).
pub fn is_pair_pattern(pattern: Pattern) -> bool {
    matches!(
        pattern,
        Pattern::SparsePairGrid | Pattern::MaxDensityPairGrid | Pattern::ThreeRowOptimalTwoCropGrid
    )
}

/// Generate the cell set a given pattern fills, over every unlocked cell on
/// the board.
pub fn pattern_cells(pattern: Pattern, unlocked: &[Cell], total_crops_needed: u32) -> Vec<Cell> {
    let spacing = (f64::from(total_crops_needed + 1)).sqrt().ceil() as usize;
    let spacing = spacing.max(1);

    unlocked
        .iter()
        .copied()
        .filter(|cell| match pattern {
            Pattern::AlternatingRows => cell.y % 2 == 0,
            Pattern::SparsePairGrid => cell.x % 4 < 2 && cell.y % 4 == 0,
            Pattern::MaxDensityPairGrid => cell.x % 2 == 0,
            Pattern::ThreeRowOptimalTwoCropGrid => cell.y % 3 == 0 && cell.x % 2 == 0,
            Pattern::DenseGridWithSpacing => {
                cell.x as usize % spacing == 0 && cell.y as usize % spacing == 0
            }
            Pattern::DiagonalStripe => (usize::from(cell.x) + usize::from(cell.y)) % 3 == 0,
            Pattern::HorizontalStripe => cell.y % 3 < 1,
            Pattern::Checkerboard => (cell.x + cell.y) % 2 == 0,
        })
        .collect()
}

/// `true` if `cell` (already a member of `pattern`'s filtered cell set)
/// belongs to the pattern's "second lane" and should be seeded with the
/// second crop kind rather than the first, for the three pair patterns.
pub fn is_second_lane(pattern: Pattern, cell: Cell) -> bool {
    match pattern {
        Pattern::SparsePairGrid => cell.x % 4 == 1,
        Pattern::MaxDensityPairGrid => cell.y % 2 == 1,
        Pattern::ThreeRowOptimalTwoCropGrid => cell.x % 4 == 2,
        _ => false,
    }
}

/// Run the dominant mutation `dominant_id` through every pattern and keep
/// the pattern that places the most instances, then append the remaining
/// non-dominant workload via direct greedy placement (spec §4.7).
pub fn place(
    unlocked: &[Cell],
    catalog: &mut Catalog,
    available_ids: &[MutationId],
    workload: &[WorkloadEntry],
    dominant_id: &MutationId,
    profile: &crate::algorithm::scorer::StrategyProfile,
    rng: &mut StdRng,
) -> State {
    let dominant_qty = workload
        .iter()
        .find(|(id, _)| id == dominant_id)
        .map_or(0, |(_, qty)| *qty);

    let mutation = catalog
        .parse_cached(dominant_id, available_ids)
        .ok()
        .cloned();
    let Some(mutation) = mutation else {
        return State::new(unlocked);
    };
    let mut crop_kinds = mutation.crops.keys().cloned();
    let crop_kind: Option<CropName> = crop_kinds.next();
    let second_crop_kind: Option<CropName> = crop_kinds.next();
    let total_crops_needed: u32 = mutation.crops.values().copied().sum::<u32>() * dominant_qty;

    let dominant_instances: Vec<MutationId> = (0..dominant_qty).map(|_| dominant_id.clone()).collect();

    let mut best_state: Option<State> = None;
    let mut best_count = 0usize;

    for pattern in ALL_PATTERNS {
        let mut state = State::new(unlocked);
        if let Some(crop) = &crop_kind {
            let cells = pattern_cells(pattern, &state.board.unlocked_cells(), total_crops_needed);
            for cell in cells {
                if state.crops.has_crop(cell) || state.board.is_occupied(cell) {
                    continue;
                }
                let lane_crop = if is_pair_pattern(pattern) && is_second_lane(pattern, cell) {
                    second_crop_kind.as_ref().unwrap_or(crop)
                } else {
                    crop
                };
                state.crops.place(cell, lane_crop.clone(), format!("bulk_seed_{}", cell.index().unwrap_or(0)));
            }
        }

        let placed = greedy::place_ordered(
            &mut state,
            catalog,
            available_ids,
            &dominant_instances,
            profile,
            rng,
        );

        // Strip the synthetic seed servers so crop sharing counts reflect
        // only real placement instances; a crop left with zero real
        // servers after stripping reverts to free.
        strip_seed_servers(&mut state);

        if placed > best_count || best_state.is_none() {
            best_count = placed;
            best_state = Some(state);
        }
        if dominant_qty > 0 && best_count as u32 >= dominant_qty {
            break;
        }
    }

    let mut result = best_state.unwrap_or_else(|| State::new(unlocked));

    let remainder: Vec<MutationId> = workload
        .iter()
        .filter(|(id, _)| id != dominant_id)
        .flat_map(|(id, qty)| (0..*qty).map(move |_| id.clone()))
        .collect();
    greedy::place_ordered(&mut result, catalog, available_ids, &remainder, profile, rng);

    result
}

fn strip_seed_servers(state: &mut State) {
    let seeded_cells: Vec<Cell> = state
        .crops
        .iter()
        .filter(|(_, record)| record.serving.keys().any(|id| id.starts_with("bulk_seed_")))
        .map(|(cell, _)| cell)
        .collect();

    for cell in seeded_cells {
        let Some(record) = state.crops.get(cell) else {
            continue;
        };
        let seed_ids: Vec<String> = record
            .serving
            .keys()
            .filter(|id| id.starts_with("bulk_seed_"))
            .cloned()
            .collect();
        for seed_id in seed_ids {
            state.crops.remove_server(cell, &seed_id);
        }
    }
}
