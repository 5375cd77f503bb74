//! Tests for objective-mode presets and cross-cutting knobs

#[cfg(test)]
mod tests {
    use mutagrid::algorithm::objective::Objective;
    use mutagrid::io::configuration::{
        BOARD_SIDE, BULK_DOMINANCE_THRESHOLD, DEFAULT, DEFAULT_SEED, PROGRESS_CADENCE_DIVISOR,
        QUICK, THOROUGH,
    };

    #[test]
    fn board_side_matches_spatial_constant() {
        assert_eq!(BOARD_SIDE, mutagrid::spatial::BOARD_SIZE);
    }

    #[test]
    fn presets_scale_monotonically() {
        assert!(QUICK.max_iterations < DEFAULT.max_iterations);
        assert!(DEFAULT.max_iterations < THOROUGH.max_iterations);
        assert!(QUICK.start_temperature < THOROUGH.start_temperature);
    }

    #[test]
    fn presets_default_to_max_count() {
        assert_eq!(QUICK.objective, Objective::MaxCount);
        assert_eq!(DEFAULT.objective, Objective::MaxCount);
        assert_eq!(THOROUGH.objective, Objective::MaxCount);
    }

    #[test]
    fn default_seed_and_cadence_divisor_are_fixed() {
        assert_eq!(DEFAULT_SEED, 42);
        assert_eq!(PROGRESS_CADENCE_DIVISOR, 50);
    }

    #[test]
    fn bulk_dominance_threshold_is_a_majority_fraction() {
        assert!(BULK_DOMINANCE_THRESHOLD > 0.5);
        assert!(BULK_DOMINANCE_THRESHOLD < 1.0);
    }
}
