//! Spatial data structures: board occupancy, crops, placements and composite state
//!
//! This module contains everything in spec.md §2's "leaves first" table:
//! - `geometry` — cell coordinates, footprints, adjacency rings
//! - `board` — dense occupancy map
//! - `crops` — sparse crop-cell bookkeeping
//! - `placements` — sparse placement-instance bookkeeping
//! - `state` — the composite, clonable `State`

/// Dense 10x10 occupancy map.
pub mod board;
/// Sparse crop cell bookkeeping.
pub mod crops;
/// Cell coordinates, footprints, and adjacency rings.
pub mod geometry;
/// Sparse placement instance bookkeeping.
pub mod placements;
/// Composite board state.
pub mod state;

pub use board::Board;
pub use crops::CropMap;
pub use geometry::{BOARD_SIZE, Cell, Footprint};
pub use placements::{InstanceId, Placement, PlacementMap};
pub use state::State;
