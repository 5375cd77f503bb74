//! Atomic execute/remove of a `FeasiblePlacement` against a `State`
//!
//! Mirrors the teacher's move-apply/rollback pairing in spirit (execute and
//! remove are exact inverses modulo isolation reservations) but the payload
//! here is a mutation footprint plus its crop bookkeeping rather than a
//! wave-function-collapse cell assignment.

use crate::algorithm::feasibility::FeasiblePlacement;
use crate::catalog::ParsedMutation;
use crate::spatial::{InstanceId, Placement, State};

/// Execute a feasible placement against `state`, creating instance `instance_id`.
///
/// Occupies the footprint, reserves the isolation halo if `mutation.isolated`,
/// mirrors the already-satisfied crops into the new instance's serving sets,
/// and creates fresh crops to cover `feasible.needed_crops` by consuming
/// `feasible.free_cells` in order.
pub fn execute(
    state: &mut State,
    mutation: &ParsedMutation,
    feasible: &FeasiblePlacement,
    instance_id: InstanceId,
) {
    state.board.occupy_rect(feasible.footprint);

    if mutation.isolated {
        for cell in feasible.footprint.ring() {
            state.board.reserve_empty_for(cell, instance_id.clone());
        }
        state.placements.insert(Placement {
            instance_id,
            mutation_id: mutation.id.clone(),
            footprint: feasible.footprint,
            crops: Vec::new(),
            isolated: true,
        });
        return;
    }

    let mut crops = Vec::new();

    for (crop_kind, cells) in &feasible.satisfied_crops {
        for &cell in cells {
            state.crops.add_server(cell, instance_id.clone());
            crops.push((cell, crop_kind.clone()));
        }
    }

    let mut free_iter = feasible.free_cells.iter().copied();
    for (crop_kind, &needed) in &feasible.needed_crops {
        for _ in 0..needed {
            let Some(cell) = free_iter.next() else {
                break;
            };
            state
                .crops
                .place(cell, crop_kind.clone(), instance_id.clone());
            state.board.occupy_rect_cell(cell);
            crops.push((cell, crop_kind.clone()));
        }
    }

    state.placements.insert(Placement {
        instance_id,
        mutation_id: mutation.id.clone(),
        footprint: feasible.footprint,
        crops,
        isolated: false,
    });
}

/// Remove the instance named `instance_id` from `state`, releasing its
/// footprint and decrementing/deleting its served crops. Isolation-halo
/// reserved-empty cells are never released — see spec §9's pinned decision.
pub fn remove(state: &mut State, instance_id: &str) -> Option<Placement> {
    let placement = state.placements.remove(instance_id)?;
    state.board.release_rect(placement.footprint);

    for (cell, _) in &placement.crops {
        if state.crops.remove_server(*cell, instance_id) {
            state.board.release_rect_cell(*cell);
        }
    }

    Some(placement)
}
