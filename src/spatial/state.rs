//! Composite board state: occupancy, crops and placements, clonable as a unit

use crate::spatial::board::Board;
use crate::spatial::crops::CropMap;
use crate::spatial::geometry::Cell;
use crate::spatial::placements::PlacementMap;

/// The full mutable state the optimizer operates on: board occupancy
/// (including isolation-halo reservations), crop bookkeeping, and live
/// placement instances. Cheaply clonable — the hot loop favors move/undo
/// pairing over cloning where possible (spec §9), but a full snapshot is
/// always available for the strategies that need one (e.g. keeping the
/// best-seen state in `SimulatedAnnealing`).
#[derive(Clone, Debug)]
pub struct State {
    /// Dense occupancy/unlocked/reserved-empty tracking.
    pub board: Board,
    /// Sparse crop cell bookkeeping.
    pub crops: CropMap,
    /// Sparse placement instance bookkeeping.
    pub placements: PlacementMap,
}

impl State {
    /// Build an empty state over the given set of unlocked cells.
    pub fn new(unlocked: &[Cell]) -> Self {
        Self {
            board: Board::new(unlocked),
            crops: CropMap::new(),
            placements: PlacementMap::new(),
        }
    }

    /// Number of live placement instances.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }
}
