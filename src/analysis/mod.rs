//! Global fitness scoring and named strategy profile constants

/// Global objective over a whole `State`: count, compactness, sharing,
/// synergy, rolled into one scalar plus a breakdown.
pub mod fitness;
/// The five named strategy profiles and SA/GA/objective-mode presets
/// consumed by `algorithm::orchestrator`.
pub mod profiles;
