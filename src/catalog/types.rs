//! Raw and parsed mutation catalog record types

use std::collections::{BTreeMap, BTreeSet};

/// A mutation id as it appears in the catalog and in workloads. Opaque to the
/// engine beyond equality/ordering.
pub type MutationId = String;

/// Name of a crop kind, e.g. `"wheat"`.
pub type CropName = String;

/// One entry of a raw catalog condition map. The raw map is
/// `BTreeMap<String, ConditionValue>` where the key is either a crop name,
/// another mutation id, `"adjacent_crops"`, or `"special"`.
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionValue {
    /// A required count (crop count, dependency count, or the
    /// `adjacent_crops` isolation marker when the value is zero).
    Count(u32),
    /// The `special` condition: an opaque reason the mutation cannot be
    /// auto-placed by this engine.
    Special(String),
}

/// An opaque, caller-supplied catalog record, exactly as stored in the host's
/// catalog. The engine treats everything but `size` and `conditions` as
/// informational.
#[derive(Clone, Debug, PartialEq)]
pub struct RawMutation {
    /// Display name.
    pub name: String,
    /// Size string, `"WxH"` with `W, H` in `1..=3`.
    pub size: String,
    /// Ground affinity tag; informational only.
    pub ground_affinity: Option<String>,
    /// Drop table: item name to amount. Informational except for profit
    /// scoring in the objective-driven mode.
    pub drops: BTreeMap<String, f64>,
    /// Effect tags drawn from the closed vocabulary in `catalog::effects`.
    pub effects: BTreeSet<String>,
    /// Raw condition map; see `ConditionValue`.
    pub conditions: BTreeMap<String, ConditionValue>,
}

/// A fully parsed, normalized mutation record. Cached per id by `Catalog`;
/// immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMutation {
    /// Source id, retained for convenience.
    pub id: MutationId,
    /// Display name.
    pub name: String,
    /// Footprint size `(width, height)`, each in `1..=3`.
    pub footprint: (u8, u8),
    /// Crop requirements: crop name to required adjacency-ring count.
    pub crops: BTreeMap<CropName, u32>,
    /// Mutation-dependency requirements: mutation id to required distinct
    /// adjacent instance count.
    pub deps: BTreeMap<MutationId, u32>,
    /// `true` if this mutation requires an empty (crop-free) adjacency ring.
    pub isolated: bool,
    /// Effect tags, copied from the raw record.
    pub effects: BTreeSet<String>,
    /// `true` if any raw condition was a `special` marker this engine cannot
    /// auto-satisfy. Such mutations are filtered out of optimizer input.
    pub has_special_condition: bool,
}

impl ParsedMutation {
    /// Total footprint area in cells.
    pub const fn area(&self) -> u32 {
        self.footprint.0 as u32 * self.footprint.1 as u32
    }

    /// Priority tier used by `GreedySolver`'s ordering, the corner scoring
    /// term, and the objective-mode tier-weighted sampling/scoring formulas.
    ///
    /// The catalog's data model (spec §3) never names an explicit "tier"
    /// field — only `name`, `size`, `ground_affinity`, `drops`, `effects`,
    /// `conditions` are defined, and `ground_affinity` is explicitly
    /// informational-only. We derive tier from footprint area
    /// (`area - 1`, so a 1x1 is tier 0 and a 3x3 is tier 8): larger
    /// mutations are inherently more constrained to place and every formula
    /// that references tier already references area alongside it, so this
    /// keeps the two correlated rather than inventing an unrelated axis.
    pub const fn tier(&self) -> u32 {
        self.area() - 1
    }
}
