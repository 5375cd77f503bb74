//! Raw-to-parsed mutation normalization, with a per-`Catalog` parse cache
//!
//! Parsing never mutates the caller's raw catalog — see spec.md §9's Open
//! Question about the godseed override leaking back into a shared catalog.
//! `Catalog::parse_cached` always returns a fresh, owned `ParsedMutation` on
//! first use and a cached clone afterward; the raw map is never written to.

use crate::catalog::godseed::{GODSEED_ID, compute_godseed_conditions};
use crate::catalog::types::{ConditionValue, MutationId, ParsedMutation, RawMutation};
use std::collections::{BTreeMap, HashMap};

/// A read-only raw catalog plus a private, per-instance parse cache.
///
/// Two independent `Catalog`s never share cache state, satisfying spec §5's
/// note that the catalog cache must be read-only-after-construction or
/// guarded: here each optimizer simply owns its own `Catalog`.
#[derive(Clone, Debug)]
pub struct Catalog {
    raw: BTreeMap<MutationId, RawMutation>,
    cache: HashMap<MutationId, ParsedMutation>,
}

/// Failure parsing a single raw record: a programmer error, not a routine
/// placement-failure branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The `size` field was not a valid `"WxH"` string with `W, H` in `1..=3`.
    MalformedSize {
        /// The id of the offending record.
        id: MutationId,
        /// The raw size string that failed to parse.
        size: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedSize { id, size } => {
                write!(f, "mutation '{id}' has malformed size string '{size}'")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a `"WxH"` size string into `(width, height)`.
///
/// # Errors
///
/// Returns `ParseError::MalformedSize` if the string is not of the form
/// `"WxH"` with both `W` and `H` integers in `1..=3`.
pub fn parse_size(id: &str, size: &str) -> Result<(u8, u8), ParseError> {
    let fail = || ParseError::MalformedSize {
        id: id.to_string(),
        size: size.to_string(),
    };

    let (w_str, h_str) = size.split_once('x').ok_or_else(fail)?;
    let width: u8 = w_str.parse().map_err(|_| fail())?;
    let height: u8 = h_str.parse().map_err(|_| fail())?;
    if !(1..=3).contains(&width) || !(1..=3).contains(&height) {
        return Err(fail());
    }
    Ok((width, height))
}

impl Catalog {
    /// Build a catalog from a raw record map. Ownership of the map moves in;
    /// the engine never hands back a mutated view of it.
    pub fn new(raw: BTreeMap<MutationId, RawMutation>) -> Self {
        Self {
            raw,
            cache: HashMap::new(),
        }
    }

    /// Raw record for `id`, if present.
    pub fn raw(&self, id: &str) -> Option<&RawMutation> {
        self.raw.get(id)
    }

    /// `true` if `id` is present in the raw catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.raw.contains_key(id)
    }

    /// All raw ids in the catalog.
    pub fn ids(&self) -> impl Iterator<Item = &MutationId> {
        self.raw.keys()
    }

    /// Parse (or fetch the cached parse of) the mutation named `id`.
    ///
    /// When `id` equals the distinguished godseed id and no raw record exists
    /// for it (or its raw conditions are empty), the conditions are computed
    /// dynamically from `available_ids` per spec §4.1's set-cover rule. The
    /// computed record is cached but never written back into `self.raw`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MalformedSize` if the raw record's size string is
    /// invalid.
    pub fn parse_cached(
        &mut self,
        id: &str,
        available_ids: &[MutationId],
    ) -> Result<&ParsedMutation, ParseError> {
        if !self.cache.contains_key(id) {
            let parsed = self.parse_fresh(id, available_ids)?;
            self.cache.insert(id.to_string(), parsed);
        }
        self.cache
            .get(id)
            .ok_or_else(|| ParseError::MalformedSize {
                id: id.to_string(),
                size: String::new(),
            })
    }

    fn parse_fresh(
        &self,
        id: &str,
        available_ids: &[MutationId],
    ) -> Result<ParsedMutation, ParseError> {
        if id == GODSEED_ID {
            if let Some(raw) = self.raw.get(id) {
                if !raw.conditions.is_empty() {
                    return parse_record(id, raw, &self.raw);
                }
            }
            return Ok(compute_godseed_conditions(&self.raw, available_ids));
        }

        let raw = self
            .raw
            .get(id)
            .ok_or_else(|| ParseError::MalformedSize {
                id: id.to_string(),
                size: String::new(),
            })?;
        parse_record(id, raw, &self.raw)
    }
}

/// Parse a single raw record into its normalized form.
///
/// # Errors
///
/// Returns `ParseError::MalformedSize` if `raw.size` does not match `"WxH"`.
pub fn parse_record(
    id: &str,
    raw: &RawMutation,
    catalog: &BTreeMap<MutationId, RawMutation>,
) -> Result<ParsedMutation, ParseError> {
    let footprint = parse_size(id, &raw.size)?;

    let mut crops = BTreeMap::new();
    let mut deps = BTreeMap::new();
    let mut isolated = false;
    let mut has_special_condition = false;

    for (key, value) in &raw.conditions {
        match value {
            ConditionValue::Special(_) => {
                has_special_condition = true;
            }
            ConditionValue::Count(count) => {
                if key == "adjacent_crops" {
                    if *count == 0 {
                        isolated = true;
                    }
                } else if catalog.contains_key(key) {
                    deps.insert(key.clone(), *count);
                } else {
                    crops.insert(key.clone(), *count);
                }
            }
        }
    }

    Ok(ParsedMutation {
        id: id.to_string(),
        name: raw.name.clone(),
        footprint,
        crops,
        deps,
        isolated,
        effects: raw.effects.clone(),
        has_special_condition,
    })
}
