//! Placement instances and the sparse instance-id <-> cell maps

use crate::catalog::{CropName, MutationId};
use crate::spatial::geometry::{Cell, Footprint};
use std::collections::BTreeMap;

/// Stable identifier for a single placed instance of a mutation. Convention
/// `"<mutationId>_<n>"`, but callers must not rely on the format — it is
/// opaque beyond equality.
pub type InstanceId = String;

/// A single placed mutation instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Stable instance id.
    pub instance_id: InstanceId,
    /// Source catalog id.
    pub mutation_id: MutationId,
    /// Footprint anchor and size.
    pub footprint: Footprint,
    /// Crops placed to satisfy this instance: `(cell, crop name)` pairs, in
    /// the order they were created.
    pub crops: Vec<(Cell, CropName)>,
    /// `true` if this instance is isolation-requiring.
    pub isolated: bool,
}

impl Placement {
    /// Keys of crop cells this placement itself created or reused.
    pub fn crop_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.crops.iter().map(|(cell, _)| *cell)
    }
}

/// Sparse bookkeeping of live placement instances and the reverse
/// cell-to-instance map used by feasibility/scoring to find "what occupies
/// this cell" in O(1).
#[derive(Clone, Debug, Default)]
pub struct PlacementMap {
    instances: BTreeMap<InstanceId, Placement>,
    by_cell: BTreeMap<Cell, InstanceId>,
    next_suffix: BTreeMap<MutationId, u32>,
}

impl PlacementMap {
    /// An empty placement map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next `"<mutationId>_<n>"` instance id for `mutation_id`,
    /// without reserving it — call `insert` to actually record the instance.
    pub fn next_instance_id(&self, mutation_id: &str) -> InstanceId {
        let n = self.next_suffix.get(mutation_id).copied().unwrap_or(0) + 1;
        format!("{mutation_id}_{n}")
    }

    /// Record a new placement. Updates the footprint reverse map; does not
    /// touch crops (crops are recorded separately in `CropMap`).
    pub fn insert(&mut self, placement: Placement) {
        for cell in placement.footprint.cells() {
            self.by_cell.insert(cell, placement.instance_id.clone());
        }
        let counter = self
            .next_suffix
            .entry(placement.mutation_id.clone())
            .or_insert(0);
        *counter += 1;
        self.instances.insert(placement.instance_id.clone(), placement);
    }

    /// Remove and return the placement named `instance_id`, clearing its
    /// footprint cells from the reverse map.
    pub fn remove(&mut self, instance_id: &str) -> Option<Placement> {
        let placement = self.instances.remove(instance_id)?;
        for cell in placement.footprint.cells() {
            self.by_cell.remove(&cell);
        }
        Some(placement)
    }

    /// Look up a placement by instance id.
    pub fn get(&self, instance_id: &str) -> Option<&Placement> {
        self.instances.get(instance_id)
    }

    /// Look up which instance (if any) occupies `cell`'s footprint.
    pub fn at_cell(&self, cell: Cell) -> Option<&Placement> {
        self.by_cell.get(&cell).and_then(|id| self.instances.get(id))
    }

    /// Number of live placements.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// `true` if there are no live placements.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterate all live placements.
    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.instances.values()
    }

    /// Count distinct live instances of `mutation_id` touching `ring`.
    pub fn distinct_instances_of_kind_in(&self, ring: &[Cell], mutation_id: &str) -> Vec<InstanceId> {
        let mut seen = Vec::new();
        for &cell in ring {
            if let Some(placement) = self.at_cell(cell) {
                if placement.mutation_id == mutation_id && !seen.contains(&placement.instance_id) {
                    seen.push(placement.instance_id.clone());
                }
            }
        }
        seen
    }
}
