//! Dense 10x10 occupancy map with per-cell unlocked/occupied/reserved state
//!
//! Mirrors the teacher's `GridState` dense-array approach but fixed at
//! `BOARD_SIZE` x `BOARD_SIZE` — no dynamic extension is needed since the
//! board size never changes.

use crate::spatial::geometry::{BOARD_SIZE, Cell, Footprint};
use crate::spatial::placements::InstanceId;
use ndarray::Array2;

/// Per-cell board state: whether the host marked it usable, whether a
/// mutation footprint currently covers it, and whether it is reserved empty
/// by an isolation halo.
#[derive(Clone, Debug)]
pub struct Board {
    unlocked: Array2<bool>,
    occupied: Array2<bool>,
    reserved_empty: Array2<bool>,
    reserved_source: Array2<Option<InstanceId>>,
}

impl Board {
    /// Build a board from the set of unlocked cells. Cells not present in
    /// `unlocked` are permanently locked for the life of the board.
    pub fn new(unlocked: &[Cell]) -> Self {
        let mut grid = Array2::from_elem((BOARD_SIZE, BOARD_SIZE), false);
        for &cell in unlocked {
            if let Some((x, y)) = Self::coords(cell) {
                if let Some(slot) = grid.get_mut((y, x)) {
                    *slot = true;
                }
            }
        }
        Self {
            unlocked: grid,
            occupied: Array2::from_elem((BOARD_SIZE, BOARD_SIZE), false),
            reserved_empty: Array2::from_elem((BOARD_SIZE, BOARD_SIZE), false),
            reserved_source: Array2::from_elem((BOARD_SIZE, BOARD_SIZE), None),
        }
    }

    const fn coords(cell: Cell) -> Option<(usize, usize)> {
        if cell.in_bounds() {
            Some((cell.x as usize, cell.y as usize))
        } else {
            None
        }
    }

    /// `true` if `cell` is in-bounds, unlocked, not occupied, and not crop-held
    /// by the caller's own bookkeeping (crop occupancy is tracked separately
    /// by `CropMap`; `is_free` only reflects footprint occupancy).
    pub fn is_free(&self, cell: Cell) -> bool {
        Self::coords(cell).is_some_and(|(x, y)| {
            self.unlocked.get((y, x)).copied().unwrap_or(false)
                && !self.occupied.get((y, x)).copied().unwrap_or(true)
        })
    }

    /// `true` if `cell` was marked unlocked at construction.
    pub fn is_unlocked(&self, cell: Cell) -> bool {
        Self::coords(cell).is_some_and(|(x, y)| self.unlocked.get((y, x)).copied().unwrap_or(false))
    }

    /// `true` if a cell currently holds a mutation footprint.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        Self::coords(cell).is_some_and(|(x, y)| self.occupied.get((y, x)).copied().unwrap_or(false))
    }

    /// `true` if a cell is reserved empty by an isolation halo.
    pub fn is_reserved_empty(&self, cell: Cell) -> bool {
        Self::coords(cell)
            .is_some_and(|(x, y)| self.reserved_empty.get((y, x)).copied().unwrap_or(false))
    }

    /// `true` if every cell of `footprint` is free and not reserved-empty.
    pub fn fits_rect(&self, footprint: Footprint) -> bool {
        footprint
            .cells()
            .into_iter()
            .all(|cell| self.is_free(cell) && !self.is_reserved_empty(cell))
    }

    /// Mark every cell of `footprint` occupied.
    ///
    /// # Panics
    ///
    /// Never panics; cells outside the board are silently ignored (the caller
    /// is expected to have validated the footprint with `fits_rect` first).
    pub fn occupy_rect(&mut self, footprint: Footprint) {
        for cell in footprint.cells() {
            if let Some((x, y)) = Self::coords(cell) {
                if let Some(slot) = self.occupied.get_mut((y, x)) {
                    *slot = true;
                }
            }
        }
    }

    /// Clear occupation from every cell of `footprint`.
    pub fn release_rect(&mut self, footprint: Footprint) {
        for cell in footprint.cells() {
            if let Some((x, y)) = Self::coords(cell) {
                if let Some(slot) = self.occupied.get_mut((y, x)) {
                    *slot = false;
                }
            }
        }
    }

    /// Mark a single crop cell occupied.
    pub fn occupy_rect_cell(&mut self, cell: Cell) {
        if let Some((x, y)) = Self::coords(cell) {
            if let Some(slot) = self.occupied.get_mut((y, x)) {
                *slot = true;
            }
        }
    }

    /// Clear occupation from a single crop cell.
    pub fn release_rect_cell(&mut self, cell: Cell) {
        if let Some((x, y)) = Self::coords(cell) {
            if let Some(slot) = self.occupied.get_mut((y, x)) {
                *slot = false;
            }
        }
    }

    /// Mark a single cell reserved-empty, only if it is unlocked. Reserved
    /// cells are never released once set — see `Placer::remove`.
    pub fn reserve_empty(&mut self, cell: Cell) {
        if self.is_unlocked(cell) {
            if let Some((x, y)) = Self::coords(cell) {
                if let Some(slot) = self.reserved_empty.get_mut((y, x)) {
                    *slot = true;
                }
            }
        }
    }

    /// Mark a single cell reserved-empty, only if it is unlocked, recording
    /// which isolated instance caused the reservation. Output projection
    /// (`GridBuilder`) uses this to label `empty_zone` cells even after the
    /// reserving instance has been removed (reservations outlive removal).
    pub fn reserve_empty_for(&mut self, cell: Cell, source: InstanceId) {
        if self.is_unlocked(cell) {
            if let Some((x, y)) = Self::coords(cell) {
                if let Some(slot) = self.reserved_empty.get_mut((y, x)) {
                    *slot = true;
                }
                if let Some(slot) = self.reserved_source.get_mut((y, x)) {
                    *slot = Some(source);
                }
            }
        }
    }

    /// The instance id that caused `cell`'s reservation, if any.
    pub fn reserved_source(&self, cell: Cell) -> Option<&InstanceId> {
        Self::coords(cell).and_then(|(x, y)| self.reserved_source.get((y, x)).and_then(Option::as_ref))
    }

    /// All cells marked unlocked at construction, in row-major order.
    pub fn unlocked_cells(&self) -> Vec<Cell> {
        let mut out = Vec::new();
        for y in 0..BOARD_SIZE as u8 {
            for x in 0..BOARD_SIZE as u8 {
                let cell = Cell::new(x, y);
                if self.is_unlocked(cell) {
                    out.push(cell);
                }
            }
        }
        out
    }
}
