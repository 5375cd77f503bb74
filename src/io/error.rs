//! Error taxonomy: programmer-error failures only, never routine placement failure
//!
//! Spec §7 draws a hard line: infeasibility, an empty workload, or an
//! unsatisfiable objective pool are routine branches reflected in output data
//! (a lower placement rate, an empty state), never an `Err`. Only malformed
//! input the caller should have validated — an unknown catalog id, a
//! malformed size string, an out-of-range coordinate, a non-positive quantity
//! — raises an error. Mirrors the teacher's hand-rolled `AlgorithmError`
//! (`Debug`-derived, manual `Display`, manual `std::error::Error`) rather than
//! pulling in `thiserror`.

use std::fmt;

/// Errors surfaced by the workload-driven and objective-driven entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizeError {
    /// A workload or allowed-pool id is not present in the catalog.
    UnknownMutationId {
        /// The offending id.
        id: String,
    },
    /// A workload quantity was zero or negative.
    InvalidQuantity {
        /// The offending id.
        id: String,
        /// The invalid quantity supplied.
        quantity: i64,
    },
    /// An unlocked cell coordinate fell outside the board.
    CoordinateOutOfRange {
        /// X coordinate as supplied.
        x: i64,
        /// Y coordinate as supplied.
        y: i64,
    },
    /// A raw catalog record's `size` field was not a valid `"WxH"` string.
    MalformedSize {
        /// The id of the offending record.
        id: String,
        /// The raw size string that failed to parse.
        size: String,
    },
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMutationId { id } => {
                write!(f, "mutation id '{id}' is not present in the catalog")
            }
            Self::InvalidQuantity { id, quantity } => {
                write!(f, "mutation '{id}' has invalid workload quantity {quantity}")
            }
            Self::CoordinateOutOfRange { x, y } => {
                write!(f, "cell ({x}, {y}) is outside the 10x10 board")
            }
            Self::MalformedSize { id, size } => {
                write!(f, "mutation '{id}' has malformed size string '{size}'")
            }
        }
    }
}

impl std::error::Error for OptimizeError {}

impl From<crate::catalog::ParseError> for OptimizeError {
    fn from(err: crate::catalog::ParseError) -> Self {
        match err {
            crate::catalog::ParseError::MalformedSize { id, size } => {
                Self::MalformedSize { id, size }
            }
        }
    }
}

/// Crate-wide result alias for the fail-fast precondition errors above.
pub type Result<T> = std::result::Result<T, OptimizeError>;

/// Reasons an optimizer run produced an empty or degenerate state without it
/// being a programmer error — these are informational, surfaced on the
/// result rather than raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// The workload or allowed pool was empty; an all-null grid is returned.
    EmptyWorkload,
    /// Every candidate in the allowed pool had an unsatisfiable `special`
    /// condition; an empty state is returned with zero iterations.
    AllSpecial,
    /// The abort signal fired mid-run; the best state observed is returned.
    Cancelled,
    /// The run completed its full iteration budget without early exit.
    Completed,
}
