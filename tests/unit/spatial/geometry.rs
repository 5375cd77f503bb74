//! Tests for cell/footprint geometry and adjacency ring math

#[cfg(test)]
mod tests {
    use mutagrid::spatial::{BOARD_SIZE, Cell, Footprint};

    #[test]
    fn cell_index_roundtrips_for_every_in_bounds_cell() {
        for y in 0..BOARD_SIZE as u8 {
            for x in 0..BOARD_SIZE as u8 {
                let cell = Cell::new(x, y);
                let idx = cell.index().expect("in-bounds cell must index");
                assert_eq!(Cell::from_index(idx), Some(cell));
            }
        }
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Cell::new(1, 1);
        let b = Cell::new(4, 5);
        assert_eq!(a.manhattan(b), b.manhattan(a));
        assert_eq!(a.manhattan(b), 7);
    }

    #[test]
    fn footprint_new_rejects_out_of_bounds() {
        assert!(Footprint::new(Cell::new(9, 9), 2, 2).is_none());
        assert!(Footprint::new(Cell::new(8, 8), 2, 2).is_some());
    }

    #[test]
    fn ring_excludes_footprint_cells_and_clips_at_edge() {
        let interior = Footprint::new(Cell::new(4, 4), 2, 2).expect("valid");
        let ring = interior.ring();
        for cell in interior.cells() {
            assert!(!ring.contains(&cell));
        }
        assert_eq!(ring.len(), 12);

        let corner = Footprint::new(Cell::new(0, 0), 1, 1).expect("valid");
        assert_eq!(corner.ring().len(), 3);
    }

    #[test]
    fn overlap_detection_matches_shared_cells() {
        let a = Footprint::new(Cell::new(0, 0), 2, 2).expect("valid");
        let b = Footprint::new(Cell::new(1, 1), 2, 2).expect("valid");
        let c = Footprint::new(Cell::new(2, 2), 2, 2).expect("valid");
        assert!(a.overlaps(b));
        assert!(!a.overlaps(c));
    }
}
