//! Error types surfaced by the game core.

use thiserror::Error;

/// Failures the coordinator reports back to clients or HTTP callers.
///
/// Validation failures and unknown sessions on reads become unicast `error`
/// frames; unknown sessions on mutating actions are swallowed as no-ops to
/// match the wire protocol, so they never reach this type. Insufficient
/// words is fatal at session-creation time and aborts the creation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid clue or number")]
    InvalidClue,

    #[error("No game found with ID: {0}")]
    UnknownSession(String),

    #[error("word bank has {available} words, a board needs at least 25")]
    InsufficientWords { available: usize },
}
