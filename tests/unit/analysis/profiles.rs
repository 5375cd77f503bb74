//! Tests for the named strategy profile constants

#[cfg(test)]
mod tests {
    use mutagrid::analysis::profiles::{COMPACT_BALANCED, EXPLORATION, NAMED_PROFILES};

    #[test]
    fn named_profiles_share_synergy_weight() {
        for (_, profile) in NAMED_PROFILES {
            assert!((profile.synergy_weight - 0.5).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn ga_seed_randomness_spans_zero_to_point_seven() {
        assert_eq!(mutagrid::analysis::profiles::GA_SEED_RANDOMNESS.first(), Some(&0.0));
        assert_eq!(mutagrid::analysis::profiles::GA_SEED_RANDOMNESS.last(), Some(&0.7));
        assert_eq!(mutagrid::analysis::profiles::GA_SEED_RANDOMNESS.len(), 8);
    }

    #[test]
    fn exploration_is_the_only_profile_with_nonzero_randomness() {
        for (label, profile) in NAMED_PROFILES {
            if *label == "exploration" {
                assert!(profile.randomness > 0.0);
            } else {
                assert!((profile.randomness - 0.0).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn compact_balanced_is_listed_first() {
        assert_eq!(NAMED_PROFILES.first().map(|(label, _)| *label), Some("compact-balanced"));
        assert_eq!(NAMED_PROFILES.first().map(|(_, profile)| *profile), Some(COMPACT_BALANCED));
    }

    #[test]
    fn exploration_constant_matches_its_table_entry() {
        let found = NAMED_PROFILES.iter().find(|(label, _)| *label == "exploration");
        assert_eq!(found.map(|(_, profile)| *profile), Some(EXPLORATION));
    }
}
