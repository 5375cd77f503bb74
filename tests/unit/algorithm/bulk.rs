//! Tests for the regular crop-pattern fast path over dominant workloads

#[cfg(test)]
mod tests {
    use mutagrid::algorithm::bulk::{Pattern, is_bulk_eligible, is_pair_pattern, is_second_lane, pattern_cells, place};
    use mutagrid::algorithm::scorer::StrategyProfile;
    use mutagrid::catalog::{Catalog, RawMutation};
    use mutagrid::spatial::{BOARD_SIZE, Cell};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{BTreeMap, BTreeSet};

    fn catalog_with_one_by_one() -> Catalog {
        let mut raw = BTreeMap::new();
        raw.insert(
            "dominant".to_string(),
            RawMutation {
                name: "dominant".to_string(),
                size: "1x1".to_string(),
                ground_affinity: None,
                drops: BTreeMap::new(),
                effects: BTreeSet::new(),
                conditions: BTreeMap::new(),
            },
        );
        Catalog::new(raw)
    }

    fn profile() -> StrategyProfile {
        StrategyProfile {
            sharing_weight: 1.0,
            compactness_weight: 2.0,
            synergy_weight: 0.5,
            corner_weight: 1.0,
            randomness: 0.0,
        }
    }

    fn full_unlocked() -> Vec<Cell> {
        (0..BOARD_SIZE as u8)
            .flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| Cell::new(x, y)))
            .collect()
    }

    fn catalog_with_two_crop_kinds() -> Catalog {
        let mut raw = BTreeMap::new();
        let mut conditions = BTreeMap::new();
        conditions.insert("wheat".to_string(), mutagrid::catalog::ConditionValue::Count(1));
        conditions.insert("corn".to_string(), mutagrid::catalog::ConditionValue::Count(1));
        raw.insert(
            "dominant".to_string(),
            RawMutation {
                name: "dominant".to_string(),
                size: "1x1".to_string(),
                ground_affinity: None,
                drops: BTreeMap::new(),
                effects: BTreeSet::new(),
                conditions,
            },
        );
        Catalog::new(raw)
    }

    #[test]
    fn empty_workload_is_never_eligible() {
        let mut catalog = catalog_with_one_by_one();
        assert_eq!(is_bulk_eligible(&[], &mut catalog, &["dominant".to_string()]), None);
    }

    #[test]
    fn isolated_mutation_is_never_bulk_eligible() {
        let mut raw = BTreeMap::new();
        let mut conditions = BTreeMap::new();
        conditions.insert(
            "adjacent_crops".to_string(),
            mutagrid::catalog::ConditionValue::Count(0),
        );
        raw.insert(
            "iso".to_string(),
            RawMutation {
                name: "iso".to_string(),
                size: "1x1".to_string(),
                ground_affinity: None,
                drops: BTreeMap::new(),
                effects: BTreeSet::new(),
                conditions,
            },
        );
        let mut catalog = Catalog::new(raw);
        let workload = vec![("iso".to_string(), 10)];
        assert_eq!(is_bulk_eligible(&workload, &mut catalog, &["iso".to_string()]), None);
    }

    #[test]
    fn non_1x1_mutation_is_never_bulk_eligible() {
        let mut raw = BTreeMap::new();
        raw.insert(
            "big".to_string(),
            RawMutation {
                name: "big".to_string(),
                size: "2x2".to_string(),
                ground_affinity: None,
                drops: BTreeMap::new(),
                effects: BTreeSet::new(),
                conditions: BTreeMap::new(),
            },
        );
        let mut catalog = Catalog::new(raw);
        let workload = vec![("big".to_string(), 10)];
        assert_eq!(is_bulk_eligible(&workload, &mut catalog, &["big".to_string()]), None);
    }

    #[test]
    fn dominance_threshold_detects_and_rejects() {
        let mut catalog = catalog_with_one_by_one();
        let available = vec!["dominant".to_string(), "rare".to_string()];
        let dominant_workload = vec![("dominant".to_string(), 9), ("rare".to_string(), 1)];
        assert_eq!(
            is_bulk_eligible(&dominant_workload, &mut catalog, &available),
            Some("dominant".to_string())
        );

        let balanced_workload = vec![("dominant".to_string(), 5), ("rare".to_string(), 5)];
        assert_eq!(is_bulk_eligible(&balanced_workload, &mut catalog, &available), None);
    }

    #[test]
    fn bulk_place_fills_dominant_quantity() {
        let mut catalog = catalog_with_one_by_one();
        let available = vec!["dominant".to_string(), "rare".to_string()];
        let workload = vec![("dominant".to_string(), 10), ("rare".to_string(), 1)];
        let mut rng = StdRng::seed_from_u64(5);

        let state = place(
            &full_unlocked(),
            &mut catalog,
            &available,
            &workload,
            &"dominant".to_string(),
            &profile(),
            &mut rng,
        );
        assert!(state.placement_count() >= 10);
    }

    #[test]
    fn pair_patterns_split_their_cell_set_into_two_lanes() {
        let cells = pattern_cells(Pattern::SparsePairGrid, &full_unlocked(), 40);
        let first_lane = cells.iter().any(|&c| !is_second_lane(Pattern::SparsePairGrid, c));
        let second_lane = cells.iter().any(|&c| is_second_lane(Pattern::SparsePairGrid, c));
        assert!(first_lane && second_lane);
        assert!(is_pair_pattern(Pattern::SparsePairGrid));
        assert!(is_pair_pattern(Pattern::MaxDensityPairGrid));
        assert!(is_pair_pattern(Pattern::ThreeRowOptimalTwoCropGrid));
        assert!(!is_pair_pattern(Pattern::Checkerboard));
    }

    #[test]
    fn bulk_place_with_two_crop_kinds_seeds_both() {
        let mut catalog = catalog_with_two_crop_kinds();
        let available = vec!["dominant".to_string()];
        let workload = vec![("dominant".to_string(), 30)];
        let mut rng = StdRng::seed_from_u64(5);

        let state = place(
            &full_unlocked(),
            &mut catalog,
            &available,
            &workload,
            &"dominant".to_string(),
            &profile(),
            &mut rng,
        );

        let crop_kinds: std::collections::BTreeSet<_> =
            state.crops.iter().map(|(_, record)| record.crop.clone()).collect();
        assert!(!crop_kinds.is_empty() && crop_kinds.len() <= 2);
    }
}
