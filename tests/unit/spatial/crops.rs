//! Tests for sparse crop-cell bookkeeping

#[cfg(test)]
mod tests {
    use mutagrid::spatial::{Cell, CropMap};

    #[test]
    fn place_then_remove_last_server_deletes_record() {
        let mut crops = CropMap::new();
        let cell = Cell::new(1, 1);
        crops.place(cell, "wheat".to_string(), "m_1".to_string());
        assert!(crops.has_crop(cell));
        assert!(crops.remove_server(cell, "m_1"));
        assert!(!crops.has_crop(cell));
    }

    #[test]
    fn shared_crop_survives_single_removal() {
        let mut crops = CropMap::new();
        let cell = Cell::new(2, 2);
        crops.place(cell, "wheat".to_string(), "a_1".to_string());
        crops.add_server(cell, "b_1".to_string());
        assert!(crops.get(cell).expect("present").is_shared());

        assert!(!crops.remove_server(cell, "a_1"));
        assert!(crops.has_crop(cell));
        assert!(!crops.get(cell).expect("present").is_shared());
    }

    #[test]
    fn shared_count_reflects_multi_server_cells() {
        let mut crops = CropMap::new();
        crops.place(Cell::new(0, 0), "wheat".to_string(), "a_1".to_string());
        crops.place(Cell::new(1, 0), "wheat".to_string(), "b_1".to_string());
        crops.add_server(Cell::new(1, 0), "c_1".to_string());
        assert_eq!(crops.shared_count(), 1);
    }

    #[test]
    fn remove_server_on_absent_cell_is_a_no_op() {
        let mut crops = CropMap::new();
        assert!(!crops.remove_server(Cell::new(9, 9), "nobody"));
    }
}
