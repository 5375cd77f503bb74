//! Tests for the `State` to external grid projection

#[cfg(test)]
mod tests {
    use mutagrid::algorithm::feasibility::check_feasibility;
    use mutagrid::algorithm::placer;
    use mutagrid::catalog::{Catalog, ParsedMutation, RawMutation};
    use mutagrid::io::output::{GridCell, build};
    use mutagrid::spatial::{BOARD_SIZE, Cell, State};
    use std::collections::{BTreeMap, BTreeSet};

    fn full_state() -> State {
        let cells: Vec<Cell> = (0..BOARD_SIZE as u8)
            .flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| Cell::new(x, y)))
            .collect();
        State::new(&cells)
    }

    fn mutation(width: u8, height: u8) -> ParsedMutation {
        ParsedMutation {
            id: "m".to_string(),
            name: "Mutator".to_string(),
            footprint: (width, height),
            crops: BTreeMap::new(),
            deps: BTreeMap::new(),
            isolated: false,
            effects: BTreeSet::new(),
            has_special_condition: false,
        }
    }

    #[test]
    fn empty_state_produces_an_all_null_grid_and_echoes_unlocked() {
        let state = full_state();
        let catalog = Catalog::new(BTreeMap::new());
        let output = build(&state, &catalog);
        assert!(output.placements.is_empty());
        assert!(output.grid.iter().flatten().all(|cell| *cell == GridCell::Null));
        assert_eq!(output.unlocked.len(), BOARD_SIZE * BOARD_SIZE);
    }

    #[test]
    fn placed_mutation_echoes_name_and_size_string_from_the_catalog() {
        let mut state = full_state();
        let m = mutation(2, 2);
        let feasible = check_feasibility(&state, &m, Cell::new(0, 0)).expect("feasible");
        placer::execute(&mut state, &m, &feasible, "m_1".to_string());

        let mut raw = BTreeMap::new();
        raw.insert(
            "m".to_string(),
            RawMutation {
                name: "Mutator".to_string(),
                size: "2x2".to_string(),
                ground_affinity: None,
                drops: BTreeMap::new(),
                effects: BTreeSet::new(),
                conditions: BTreeMap::new(),
            },
        );
        let catalog = Catalog::new(raw);

        let output = build(&state, &catalog);
        assert_eq!(output.placements.len(), 1);
        let placed = output.placements.first().expect("one placement");
        assert_eq!(placed.name, "Mutator");
        assert_eq!(placed.size_string, "2x2");
    }

    #[test]
    fn mutation_area_marks_center_cell() {
        let mut state = full_state();
        let m = mutation(3, 3);
        let feasible = check_feasibility(&state, &m, Cell::new(0, 0)).expect("feasible");
        placer::execute(&mut state, &m, &feasible, "m_1".to_string());

        let catalog = Catalog::new(BTreeMap::new());
        let output = build(&state, &catalog);
        let center_cell = feasible.footprint.center();
        let tagged = output
            .grid
            .get(center_cell.y as usize)
            .and_then(|row| row.get(center_cell.x as usize));
        assert!(matches!(
            tagged,
            Some(GridCell::MutationArea { is_center: true, .. })
        ));
        assert_eq!(output.placements.len(), 1);
    }

    #[test]
    fn footprint_cells_other_than_the_center_are_tagged_non_center() {
        let mut state = full_state();
        let m = mutation(3, 3);
        let feasible = check_feasibility(&state, &m, Cell::new(0, 0)).expect("feasible");
        placer::execute(&mut state, &m, &feasible, "m_1".to_string());

        let catalog = Catalog::new(BTreeMap::new());
        let output = build(&state, &catalog);
        let corner = output
            .grid
            .first()
            .and_then(|row| row.first())
            .expect("corner cell exists");
        assert!(matches!(
            corner,
            GridCell::MutationArea {
                is_center: false,
                ..
            }
        ));
    }
}
