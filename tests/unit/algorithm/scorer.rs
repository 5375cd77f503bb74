//! Tests for the weighted multi-term placement scorer

#[cfg(test)]
mod tests {
    use mutagrid::algorithm::feasibility::check_feasibility;
    use mutagrid::algorithm::scorer::{StrategyProfile, score_placement};
    use mutagrid::catalog::ParsedMutation;
    use mutagrid::spatial::{Cell, State};
    use std::collections::BTreeSet;

    fn profile() -> StrategyProfile {
        StrategyProfile {
            sharing_weight: 1.0,
            compactness_weight: 2.0,
            synergy_weight: 0.5,
            corner_weight: 1.0,
            randomness: 0.0,
        }
    }

    fn mutation(isolated: bool) -> ParsedMutation {
        ParsedMutation {
            id: "m".to_string(),
            name: "m".to_string(),
            footprint: (1, 1),
            crops: Default::default(),
            deps: Default::default(),
            isolated,
            effects: BTreeSet::new(),
            has_special_condition: false,
        }
    }

    fn full_state() -> State {
        let cells: Vec<Cell> = (0..10u8)
            .flat_map(|y| (0..10u8).map(move |x| Cell::new(x, y)))
            .collect();
        State::new(&cells)
    }

    #[test]
    fn higher_tier_strictly_increases_score_all_else_equal() {
        let state = full_state();
        let m = mutation(false);
        let feasible = check_feasibility(&state, &m, Cell::new(5, 5)).expect("feasible");
        let prof = profile();
        let low = score_placement(&state, &m, &feasible, &prof, 0, |_| None);
        let high = score_placement(&state, &m, &feasible, &prof, 5, |_| None);
        assert!(high > low);
    }

    #[test]
    fn non_isolated_mutation_gets_no_corner_bonus() {
        let state = full_state();
        let m = mutation(false);
        let feasible = check_feasibility(&state, &m, Cell::new(0, 0)).expect("feasible");
        let prof = profile();
        let corner_bonus_weight = StrategyProfile {
            corner_weight: 1000.0,
            ..prof
        };
        let with_huge_corner_weight = score_placement(&state, &m, &feasible, &corner_bonus_weight, 0, |_| None);
        let with_normal_weight = score_placement(&state, &m, &feasible, &prof, 0, |_| None);
        assert!((with_huge_corner_weight - with_normal_weight).abs() < f64::EPSILON);
    }

    #[test]
    fn center_bonus_favors_board_center_when_empty() {
        let state = full_state();
        let m = mutation(false);
        let center_feasible = check_feasibility(&state, &m, Cell::new(4, 4)).expect("feasible");
        let corner_feasible = check_feasibility(&state, &m, Cell::new(0, 0)).expect("feasible");
        let prof = profile();
        let center_score = score_placement(&state, &m, &center_feasible, &prof, 0, |_| None);
        let corner_score = score_placement(&state, &m, &corner_feasible, &prof, 0, |_| None);
        assert!(center_score > corner_score);
    }

    #[test]
    fn corner_term_rewards_isolated_edge_anchors() {
        let state = full_state();
        let m = mutation(true);
        let corner_feasible = check_feasibility(&state, &m, Cell::new(0, 0)).expect("feasible");
        let prof = profile();
        let score = score_placement(&state, &m, &corner_feasible, &prof, 0, |_| None);
        assert!(score > 0.0);
    }

    #[test]
    fn clustering_near_existing_placements_outscores_isolation() {
        let mut state = full_state();
        let seed = mutation(false);
        let seed_feasible = check_feasibility(&state, &seed, Cell::new(5, 5)).expect("feasible");
        mutagrid::algorithm::placer::execute(&mut state, &seed, &seed_feasible, "m_1".to_string());

        let m = mutation(false);
        let near = check_feasibility(&state, &m, Cell::new(5, 6)).expect("feasible");
        let far = check_feasibility(&state, &m, Cell::new(0, 0)).expect("feasible");
        let prof = profile();
        let near_score = score_placement(&state, &m, &near, &prof, 0, |_| None);
        let far_score = score_placement(&state, &m, &far, &prof, 0, |_| None);
        assert!(near_score > far_score);
    }
}
