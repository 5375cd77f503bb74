//! External interface surface: error types, configuration, progress reporting, output projection

/// Runtime configuration: strategy profiles, SA/GA/objective-mode presets.
pub mod configuration;
/// Error taxonomy for programmer-error failures.
pub mod error;
/// `GridBuilder`: projects a `State` into the external grid/placements format.
pub mod output;
/// Progress-callback contract consulted during long-running optimizer calls.
pub mod progress;
