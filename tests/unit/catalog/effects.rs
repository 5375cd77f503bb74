//! Tests for the closed effect-tag vocabulary and profit weights

#[cfg(test)]
mod tests {
    use mutagrid::catalog::effects::{has_only_positive_effect, has_spread_effect, profit_weight};
    use std::collections::BTreeSet;

    #[test]
    fn positive_effect_with_no_negative_passes() {
        let mut effects = BTreeSet::new();
        effects.insert("bonus_drops".to_string());
        assert!(has_only_positive_effect(&effects));
    }

    #[test]
    fn any_negative_tag_disqualifies() {
        let mut effects = BTreeSet::new();
        effects.insert("harvest_boost".to_string());
        effects.insert("water_drain".to_string());
        assert!(!has_only_positive_effect(&effects));
    }

    #[test]
    fn spread_detection_matches_base_and_improved() {
        let mut base = BTreeSet::new();
        base.insert("effect_spread".to_string());
        assert!(has_spread_effect(&base));

        let mut improved = BTreeSet::new();
        improved.insert("improved_effect_spread".to_string());
        assert!(has_spread_effect(&improved));

        assert!(!has_spread_effect(&BTreeSet::new()));
    }

    #[test]
    fn unrecognized_tag_has_zero_weight() {
        assert!((profit_weight("totally_unknown") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn profit_weight_table_matches_spec() {
        assert!((profit_weight("improved_harvest_boost") - 100.0).abs() < f64::EPSILON);
        assert!((profit_weight("harvest_loss") + 40.0).abs() < f64::EPSILON);
        assert!((profit_weight("unknown_effect") - 0.0).abs() < f64::EPSILON);
    }
}
