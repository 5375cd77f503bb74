//! Dynamic condition computation for the distinguished "godseed" pseudo-mutation
//!
//! Godseed's conditions are not fixed catalog data: they are computed as the
//! minimum-cardinality set of other mutations that collectively cover all six
//! positive-effect types, via greedy set-cover (spec §4.1). The computed
//! record is cached by `Catalog` but never written back into the raw map.

use crate::catalog::effects::{GODSEED_COVERAGE_TYPES, has_only_positive_effect, tags_satisfying};
use crate::catalog::parser::parse_size;
use crate::catalog::types::{ConditionValue, MutationId, ParsedMutation, RawMutation};
use std::collections::{BTreeMap, BTreeSet};

/// The reserved id godseed is always addressed by.
pub const GODSEED_ID: &str = "godseed";

struct Candidate<'a> {
    id: &'a MutationId,
    area: u32,
    effect_count: usize,
    covers: BTreeSet<&'static str>,
}

/// Compute godseed's normalized record via greedy set-cover over
/// `available_ids` restricted to mutations with only-positive effects, no
/// `special` condition, and no isolation requirement.
///
/// Candidates are considered smallest-footprint-first, then
/// most-effects-first, repeatedly picking the one covering the most
/// currently-uncovered types until nothing helps or nothing remains
/// uncovered. The resulting set becomes godseed's `deps` (one required
/// instance each); godseed itself has no footprint requirement beyond its own
/// catalog-declared size (defaulting to 1x1 if absent) and is never isolated.
pub fn compute_godseed_conditions(
    raw: &BTreeMap<MutationId, RawMutation>,
    available_ids: &[MutationId],
) -> ParsedMutation {
    let mut candidates = Vec::new();
    for id in available_ids {
        let Some(record) = raw.get(id) else { continue };
        if id == GODSEED_ID {
            continue;
        }
        if record
            .conditions
            .values()
            .any(|v| matches!(v, ConditionValue::Special(_)))
        {
            continue;
        }
        if is_isolation_requiring(record) {
            continue;
        }
        if !has_only_positive_effect(&record.effects) {
            continue;
        }

        let Ok((w, h)) = parse_size(id, &record.size) else {
            continue;
        };
        let covers: BTreeSet<&'static str> = GODSEED_COVERAGE_TYPES
            .iter()
            .filter(|&&t| {
                tags_satisfying(t)
                    .iter()
                    .any(|tag| record.effects.contains(tag))
            })
            .copied()
            .collect();
        if covers.is_empty() {
            continue;
        }

        candidates.push(Candidate {
            id,
            area: w as u32 * h as u32,
            effect_count: record.effects.len(),
            covers,
        });
    }

    candidates.sort_by(|a, b| {
        a.area
            .cmp(&b.area)
            .then_with(|| b.effect_count.cmp(&a.effect_count))
            .then_with(|| a.id.cmp(b.id))
    });

    let mut uncovered: BTreeSet<&'static str> = GODSEED_COVERAGE_TYPES.iter().copied().collect();
    let mut deps = BTreeMap::new();

    loop {
        if uncovered.is_empty() {
            break;
        }
        let best = candidates
            .iter()
            .filter(|c| !deps.contains_key(c.id))
            .max_by_key(|c| c.covers.intersection(&uncovered).count());

        let Some(best) = best else { break };
        let gained = best.covers.intersection(&uncovered).count();
        if gained == 0 {
            break;
        }

        for covered in &best.covers {
            uncovered.remove(covered);
        }
        deps.insert(best.id.clone(), 1);
    }

    let footprint = raw
        .get(GODSEED_ID)
        .and_then(|r| parse_size(GODSEED_ID, &r.size).ok())
        .unwrap_or((1, 1));

    ParsedMutation {
        id: GODSEED_ID.to_string(),
        name: raw
            .get(GODSEED_ID)
            .map_or_else(|| "Godseed".to_string(), |r| r.name.clone()),
        footprint,
        crops: BTreeMap::new(),
        deps,
        isolated: false,
        effects: BTreeSet::new(),
        has_special_condition: false,
    }
}

fn is_isolation_requiring(record: &RawMutation) -> bool {
    matches!(
        record.conditions.get("adjacent_crops"),
        Some(ConditionValue::Count(0))
    )
}
