//! Pure feasibility checking for a candidate placement at a fixed anchor
//!
//! Ported from the teacher's viable-tile scan (`algorithm::selection` in the
//! source crate, which walked a 3x3 neighborhood in a fixed order and
//! intersected per-cell compatible-tile bitsets): here the "neighborhood" is
//! a mutation's adjacency ring instead of a fixed 3x3, and instead of
//! intersecting bitsets we tally crop/dep satisfaction against the
//! requirement maps. The determinism discipline is the same — a single fixed
//! traversal order, no hidden iteration-order dependence.

use crate::catalog::ParsedMutation;
use crate::spatial::{Cell, Footprint, InstanceId, State};
use std::collections::BTreeMap;

/// Result of a successful feasibility check: what the ring already satisfies,
/// what still needs a fresh crop, and where a fresh crop could go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeasiblePlacement {
    /// Anchor the check was performed at.
    pub anchor: Cell,
    /// Footprint at that anchor.
    pub footprint: Footprint,
    /// Crop kind to the ring cells already carrying it that count toward
    /// this placement's requirement (bounded at the required count).
    pub satisfied_crops: BTreeMap<String, Vec<Cell>>,
    /// Dependency mutation id to the distinct adjacent instance ids already
    /// satisfying it.
    pub satisfied_deps: BTreeMap<String, Vec<InstanceId>>,
    /// Crop kind to the number of *additional* crops still required.
    pub needed_crops: BTreeMap<String, u32>,
    /// Ring cells eligible for a brand new crop, in fixed ring traversal
    /// order.
    pub free_cells: Vec<Cell>,
}

impl FeasiblePlacement {
    /// Total additional crops this placement still needs to create.
    pub fn total_needed(&self) -> u32 {
        self.needed_crops.values().sum()
    }
}

/// Check whether `mutation` can be placed at `anchor` against `state`.
///
/// Follows spec §4.3's seven-step procedure exactly, including the rejection
/// order (footprint fit, then reserved-empty, then isolation ring scan or
/// crop/dep ring scan, then the needed-vs-free-cells capacity check).
pub fn check_feasibility(
    state: &State,
    mutation: &ParsedMutation,
    anchor: Cell,
) -> Option<FeasiblePlacement> {
    let footprint = Footprint::new(anchor, mutation.footprint.0, mutation.footprint.1)?;

    if !state.board.fits_rect(footprint) {
        return None;
    }

    let ring = footprint.ring();

    if mutation.isolated {
        for &cell in &ring {
            if state.crops.has_crop(cell) {
                return None;
            }
            if state.board.is_occupied(cell) {
                return None;
            }
        }
        return Some(FeasiblePlacement {
            anchor,
            footprint,
            satisfied_crops: BTreeMap::new(),
            satisfied_deps: BTreeMap::new(),
            needed_crops: BTreeMap::new(),
            free_cells: Vec::new(),
        });
    }

    let mut satisfied_crops: BTreeMap<String, Vec<Cell>> = BTreeMap::new();
    let mut satisfied_deps: BTreeMap<String, Vec<InstanceId>> = BTreeMap::new();
    let mut free_cells = Vec::new();

    for &cell in &ring {
        if let Some(crop) = state.crops.get(cell) {
            if let Some(&required) = mutation.crops.get(&crop.crop) {
                let satisfied = satisfied_crops.entry(crop.crop.clone()).or_default();
                if (satisfied.len() as u32) < required {
                    satisfied.push(cell);
                    continue;
                }
            }
            continue;
        }

        if let Some(placement) = state.placements.at_cell(cell) {
            if let Some(&required) = mutation.deps.get(&placement.mutation_id) {
                let satisfied = satisfied_deps
                    .entry(placement.mutation_id.clone())
                    .or_default();
                if !satisfied.contains(&placement.instance_id)
                    && (satisfied.len() as u32) < required
                {
                    satisfied.push(placement.instance_id.clone());
                }
                continue;
            }
            continue;
        }

        if !state.board.is_reserved_empty(cell) && state.board.is_unlocked(cell) {
            free_cells.push(cell);
        }
    }

    let mut needed_crops = BTreeMap::new();
    for (crop, &required) in &mutation.crops {
        let have = satisfied_crops.get(crop).map_or(0, Vec::len) as u32;
        let need = required.saturating_sub(have);
        if need > 0 {
            needed_crops.insert(crop.clone(), need);
        }
    }

    for (dep, &required) in &mutation.deps {
        let have = satisfied_deps.get(dep).map_or(0, Vec::len) as u32;
        if have < required {
            return None;
        }
    }

    let total_needed: u32 = needed_crops.values().sum();
    if total_needed as usize > free_cells.len() {
        return None;
    }

    Some(FeasiblePlacement {
        anchor,
        footprint,
        satisfied_crops,
        satisfied_deps,
        needed_crops,
        free_cells,
    })
}

/// Enumerate every anchor in fixed row-major order and return the feasible
/// placements found, paired with the anchor. Used by `GreedySolver`,
/// `SimulatedAnnealing`'s relocate move, and `BulkPlacer`.
pub fn enumerate_feasible(state: &State, mutation: &ParsedMutation) -> Vec<FeasiblePlacement> {
    let mut out = Vec::new();
    for y in 0..crate::spatial::BOARD_SIZE as u8 {
        for x in 0..crate::spatial::BOARD_SIZE as u8 {
            if let Some(feasible) = check_feasibility(state, mutation, Cell::new(x, y)) {
                out.push(feasible);
            }
        }
    }
    out
}
