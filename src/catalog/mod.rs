//! Mutation catalog parsing: raw records in, normalized `ParsedMutation`s out
//!
//! The catalog itself is opaque input data (spec §1 Non-goals); this module
//! only normalizes and caches it.

/// Closed effect-tag vocabulary and profit weight table.
pub mod effects;
/// Dynamic godseed pseudo-mutation condition computation.
pub mod godseed;
/// Raw-to-parsed normalization and the per-instance parse cache.
pub mod parser;
/// Raw and parsed record types.
pub mod types;

pub use parser::{Catalog, ParseError};
pub use types::{ConditionValue, CropName, MutationId, ParsedMutation, RawMutation};
