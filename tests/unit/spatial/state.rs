//! Tests for the composite, clonable board state

#[cfg(test)]
mod tests {
    use mutagrid::spatial::{Cell, State};

    #[test]
    fn new_state_has_no_placements_or_crops() {
        let state = State::new(&[Cell::new(0, 0), Cell::new(1, 0)]);
        assert_eq!(state.placement_count(), 0);
        assert!(state.crops.is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let state = State::new(&[Cell::new(0, 0)]);
        let mut cloned = state.clone();
        cloned.board.reserve_empty(Cell::new(0, 0));
        assert!(cloned.board.is_reserved_empty(Cell::new(0, 0)));
        assert!(!state.board.is_reserved_empty(Cell::new(0, 0)));
    }
}
