//! Tests for the genetic population refinement optimizer

#[cfg(test)]
mod tests {
    use mutagrid::algorithm::genetic::{GaConfig, run};
    use mutagrid::algorithm::scorer::StrategyProfile;
    use mutagrid::catalog::{Catalog, RawMutation};
    use mutagrid::spatial::Cell;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{BTreeMap, BTreeSet};

    fn full_unlocked() -> Vec<Cell> {
        (0..10u8)
            .flat_map(|y| (0..10u8).map(move |x| Cell::new(x, y)))
            .collect()
    }

    fn catalog_with_one_by_one() -> Catalog {
        let mut raw = BTreeMap::new();
        raw.insert(
            "m".to_string(),
            RawMutation {
                name: "m".to_string(),
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

    #[test]
    fn default_config_keeps_elite_smaller_than_population() {
        let config = GaConfig::default();
        assert!(config.elite < config.population);
    }

    #[test]
    fn single_generation_still_returns_a_populated_state() {
        let mut catalog = catalog_with_one_by_one();
        let mut rng = StdRng::seed_from_u64(21);
        let config = GaConfig {
            population: 2,
            generations: 1,
            elite: 1,
            ..GaConfig::default()
        };
        let result = run(
            &full_unlocked(),
            &mut catalog,
            &["m".to_string()],
            &[("m".to_string(), 2)],
            &profile(),
            &config,
            2,
            &mut rng,
        );
        assert!(result.placement_count() > 0);
    }

    #[test]
    fn empty_workload_returns_an_empty_state() {
        let mut catalog = catalog_with_one_by_one();
        let mut rng = StdRng::seed_from_u64(5);
        let config = GaConfig {
            population: 2,
            generations: 1,
            ..GaConfig::default()
        };
        let result = run(
            &full_unlocked(),
            &mut catalog,
            &["m".to_string()],
            &[],
            &profile(),
            &config,
            0,
            &mut rng,
        );
        assert_eq!(result.placement_count(), 0);
    }

    #[test]
    fn ga_returns_a_state_with_placements_when_room_allows() {
        let mut catalog = catalog_with_one_by_one();
        let mut rng = StdRng::seed_from_u64(11);
        let config = GaConfig {
            population: 3,
            generations: 2,
            ..GaConfig::default()
        };

        let result = run(
            &full_unlocked(),
            &mut catalog,
            &["m".to_string()],
            &[("m".to_string(), 4)],
            &profile(),
            &config,
            4,
            &mut rng,
        );
        assert!(result.placement_count() > 0);
    }
}
