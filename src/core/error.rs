//! Error taxonomy for the combat core.
//!
//! Expected, player-driven failures (unknown type id, unmet requirements,
//! out of range, not enough points) never appear here — those are surfaced
//! as `bool`/`Option`/outcome-enum returns that the caller branches on.
//! The types below cover programmer errors and corrupt save data only.

use thiserror::Error;

/// Invariant violations: these indicate a bug in the calling code, not a
/// legal player action that happened to fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A negative amount was passed where only non-negative makes sense
    /// (stat points, experience, quantities).
    #[error("negative amount not allowed: {0}")]
    NegativeAmount(i64),

    /// Attempted to shrink inventory capacity below current occupancy.
    #[error("cannot reduce max slots to {requested}: {occupied} slots occupied")]
    SlotsBelowOccupancy { requested: usize, occupied: usize },
}

/// Deserialization failures for the JSON text surface.
///
/// `Syntax` means the input is not valid JSON at all ("unknown format");
/// `Structure` means valid JSON that does not describe the expected type
/// ("corrupt save"). Callers pick a recovery path off that distinction.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid syntax: {0}")]
    Syntax(String),

    #[error("invalid structure: {0}")]
    Structure(String),
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Syntax | Category::Eof => SaveError::Syntax(err.to_string()),
            _ => SaveError::Structure(err.to_string()),
        }
    }
}
