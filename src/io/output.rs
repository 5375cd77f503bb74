//! `GridBuilder`: projects a `State` into the external annotated-grid format
//!
//! Spec §6's workload-driven entry point returns a grid of tagged cells plus
//! a placement list; this module is the pure projection step run once the
//! optimizer has picked a final `State`. No optimization logic lives here.

use crate::catalog::{Catalog, ConditionValue, MutationId};
use crate::spatial::{BOARD_SIZE, Cell, InstanceId, State};
use std::collections::BTreeMap;

/// One cell of the external output grid.
#[derive(Clone, Debug, PartialEq)]
pub enum GridCell {
    /// A cell covered by a mutation's footprint.
    MutationArea {
        /// Source catalog id.
        id: MutationId,
        /// `true` if this is the footprint's floor-midpoint cell.
        is_center: bool,
        /// `true` if the covering mutation is isolation-requiring.
        is_isolated: bool,
    },
    /// A cell carrying a crop.
    Crop {
        /// Crop kind.
        crop: String,
        /// The first instance recorded as serving this crop.
        primary_server: InstanceId,
        /// The full serving set, only populated when shared (`len() >= 2`).
        all_servers: Option<Vec<InstanceId>>,
    },
    /// A cell reserved empty by an isolation halo.
    EmptyZone {
        /// The isolated instance that caused the reservation (may no longer
        /// be live; reservations outlive removal by design).
        source_id: InstanceId,
    },
    /// An untouched cell (locked, or unlocked but unused).
    Null,
}

/// One placed mutation instance, echoed into the external output.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedMutation {
    /// Stable instance id.
    pub instance_id: InstanceId,
    /// Source catalog id.
    pub id: MutationId,
    /// Display name, from the catalog record.
    pub name: String,
    /// Footprint anchor.
    pub anchor: Cell,
    /// Original `"WxH"` size string, reconstructed from the parsed footprint.
    pub size_string: String,
    /// The raw condition map, echoed verbatim from the catalog.
    pub conditions: BTreeMap<String, ConditionValue>,
    /// `true` if isolation-requiring.
    pub is_isolated: bool,
    /// Crop cell keys shared with at least one other instance.
    pub shared_crop_keys: Vec<Cell>,
}

/// The external workload-driven output: a full grid, the placement list, and
/// the echoed unlocked set.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizeOutput {
    /// `BOARD_SIZE x BOARD_SIZE` grid, row-major (`grid[y][x]`).
    pub grid: Vec<Vec<GridCell>>,
    /// All placed mutation instances.
    pub placements: Vec<PlacedMutation>,
    /// The unlocked cell set, echoed back for the host's convenience.
    pub unlocked: Vec<Cell>,
}

/// Project `state` into the external output format. `catalog` supplies
/// display names and the raw condition maps to echo back.
pub fn build(state: &State, catalog: &Catalog) -> OptimizeOutput {
    let mut grid = vec![vec![GridCell::Null; BOARD_SIZE]; BOARD_SIZE];

    for y in 0..BOARD_SIZE as u8 {
        for x in 0..BOARD_SIZE as u8 {
            let cell = Cell::new(x, y);
            let row = y as usize;
            let col = x as usize;

            if let Some(placement) = state.placements.at_cell(cell) {
                let center = placement.footprint.center();
                if let Some(slot) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *slot = GridCell::MutationArea {
                        id: placement.mutation_id.clone(),
                        is_center: center == cell,
                        is_isolated: placement.isolated,
                    };
                }
                continue;
            }

            if let Some(record) = state.crops.get(cell) {
                let servers: Vec<InstanceId> = record.serving.keys().cloned().collect();
                let primary = servers.first().cloned().unwrap_or_default();
                let all_servers = record.is_shared().then(|| servers.clone());
                if let Some(slot) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *slot = GridCell::Crop {
                        crop: record.crop.clone(),
                        primary_server: primary,
                        all_servers,
                    };
                }
                continue;
            }

            if let Some(source) = state.board.reserved_source(cell) {
                if let Some(slot) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *slot = GridCell::EmptyZone {
                        source_id: source.clone(),
                    };
                }
            }
        }
    }

    let mut placements = Vec::new();
    for placement in state.placements.iter() {
        let raw = catalog.raw(&placement.mutation_id);
        let name = raw.map_or_else(|| placement.mutation_id.clone(), |r| r.name.clone());
        let conditions = raw.map(|r| r.conditions.clone()).unwrap_or_default();
        let size_string = format!("{}x{}", placement.footprint.width, placement.footprint.height);

        let shared_crop_keys = placement
            .crop_cells()
            .filter(|&cell| {
                state
                    .crops
                    .get(cell)
                    .is_some_and(crate::spatial::crops::CropRecord::is_shared)
            })
            .collect();

        placements.push(PlacedMutation {
            instance_id: placement.instance_id.clone(),
            id: placement.mutation_id.clone(),
            name,
            anchor: placement.footprint.anchor,
            size_string,
            conditions,
            is_isolated: placement.isolated,
            shared_crop_keys,
        });
    }

    OptimizeOutput {
        grid,
        placements,
        unlocked: state.board.unlocked_cells(),
    }
}

