//! Tests for raw-to-parsed normalization and the per-catalog parse cache

#[cfg(test)]
mod tests {
    use mutagrid::catalog::parser::{parse_record, parse_size};
    use mutagrid::catalog::{Catalog, ConditionValue, ParseError, RawMutation};
    use std::collections::{BTreeMap, BTreeSet};

    fn raw(size: &str, conditions: BTreeMap<String, ConditionValue>) -> RawMutation {
        RawMutation {
            name: "test".to_string(),
            size: size.to_string(),
            ground_affinity: None,
            drops: BTreeMap::new(),
            effects: BTreeSet::new(),
            conditions,
        }
    }

    #[test]
    fn malformed_size_is_rejected() {
        let mut map = BTreeMap::new();
        map.insert("m".to_string(), raw("4x1", BTreeMap::new()));
        let mut catalog = Catalog::new(map);
        let err = catalog.parse_cached("m", &[]).expect_err("must fail");
        assert!(matches!(err, ParseError::MalformedSize { .. }));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut catalog = Catalog::new(BTreeMap::new());
        assert!(catalog.parse_cached("nope", &[]).is_err());
    }

    #[test]
    fn parse_cached_returns_the_same_record_on_repeated_calls() {
        let mut map = BTreeMap::new();
        map.insert("m".to_string(), raw("2x2", BTreeMap::new()));
        let mut catalog = Catalog::new(map);
        let first = catalog.parse_cached("m", &[]).expect("parses").clone();
        let second = catalog.parse_cached("m", &[]).expect("parses").clone();
        assert_eq!(first, second);
    }

    #[test]
    fn contains_and_ids_reflect_the_raw_map() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), raw("1x1", BTreeMap::new()));
        let catalog = Catalog::new(map);
        assert!(catalog.contains("a"));
        assert!(!catalog.contains("b"));
        assert_eq!(catalog.ids().count(), 1);
    }

    #[test]
    fn parses_size_string() {
        assert_eq!(parse_size("m", "2x3").expect("ok"), (2, 3));
        assert!(parse_size("m", "4x1").is_err());
        assert!(parse_size("m", "bogus").is_err());
    }

    #[test]
    fn isolation_marker_detected() {
        let mut conditions = BTreeMap::new();
        conditions.insert("adjacent_crops".to_string(), ConditionValue::Count(0));
        let record = raw("1x1", conditions);
        let catalog = BTreeMap::new();
        let parsed = parse_record("iso", &record, &catalog).expect("parses");
        assert!(parsed.isolated);
        assert!(parsed.crops.is_empty());
    }

    #[test]
    fn special_condition_flags_non_placeable() {
        let mut conditions = BTreeMap::new();
        conditions.insert(
            "special".to_string(),
            ConditionValue::Special("needs_event".to_string()),
        );
        let record = raw("1x1", conditions);
        let catalog = BTreeMap::new();
        let parsed = parse_record("s", &record, &catalog).expect("parses");
        assert!(parsed.has_special_condition);
    }

    #[test]
    fn numeric_dep_key_resolved_against_catalog() {
        let mut conditions = BTreeMap::new();
        conditions.insert("wheat".to_string(), ConditionValue::Count(1));
        conditions.insert("other_mutation".to_string(), ConditionValue::Count(1));
        let record = raw("1x1", conditions);

        let mut catalog = BTreeMap::new();
        catalog.insert("other_mutation".to_string(), raw("1x1", BTreeMap::new()));

        let parsed = parse_record("m", &record, &catalog).expect("parses");
        assert_eq!(parsed.crops.get("wheat"), Some(&1));
        assert_eq!(parsed.deps.get("other_mutation"), Some(&1));
    }

    #[test]
    fn parse_cached_never_mutates_raw_catalog() {
        let mut catalog_map = BTreeMap::new();
        catalog_map.insert("m".to_string(), raw("1x1", BTreeMap::new()));
        let before = catalog_map.get("m").cloned();

        let mut catalog = Catalog::new(catalog_map);
        let _ = catalog.parse_cached("m", &[]).expect("parses");

        assert_eq!(catalog.raw("m").cloned(), before);
    }
}
