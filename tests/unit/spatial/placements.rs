//! Tests for placement instance bookkeeping and the reverse cell map

#[cfg(test)]
mod tests {
    use mutagrid::spatial::{Cell, Footprint, Placement, PlacementMap};

    fn placement(id: &str, mutation: &str, anchor: Cell) -> Placement {
        Placement {
            instance_id: id.to_string(),
            mutation_id: mutation.to_string(),
            footprint: Footprint::new(anchor, 1, 1).expect("valid"),
            crops: Vec::new(),
            isolated: false,
        }
    }

    #[test]
    fn insert_then_remove_clears_cell_map() {
        let mut map = PlacementMap::new();
        let cell = Cell::new(3, 3);
        map.insert(placement("m_1", "m", cell));
        assert!(map.at_cell(cell).is_some());
        let removed = map.remove("m_1").expect("present");
        assert_eq!(removed.instance_id, "m_1");
        assert!(map.at_cell(cell).is_none());
    }

    #[test]
    fn instance_id_suffix_increments_per_mutation() {
        let mut map = PlacementMap::new();
        assert_eq!(map.next_instance_id("m"), "m_1");
        map.insert(placement("m_1", "m", Cell::new(0, 0)));
        assert_eq!(map.next_instance_id("m"), "m_2");
    }

    #[test]
    fn distinct_instances_deduplicates_by_id() {
        let mut map = PlacementMap::new();
        map.insert(placement("dep_1", "dep", Cell::new(0, 0)));
        let ring = vec![Cell::new(0, 0)];
        let found = map.distinct_instances_of_kind_in(&ring, "dep");
        assert_eq!(found, vec!["dep_1".to_string()]);
    }

    #[test]
    fn separate_mutation_kinds_track_suffixes_independently() {
        let mut map = PlacementMap::new();
        map.insert(placement("a_1", "a", Cell::new(0, 0)));
        map.insert(placement("b_1", "b", Cell::new(1, 0)));
        assert_eq!(map.next_instance_id("a"), "a_2");
        assert_eq!(map.next_instance_id("b"), "b_2");
    }
}
