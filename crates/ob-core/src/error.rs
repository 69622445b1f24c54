//! # AppError
//!
//! Centralized error handling for the Overboard rules engine.
//! Every rule violation is reported before any state is touched.

use std::fmt::Display;

use thiserror::Error;

/// The primary error type for all ob-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A user tried to vote on a question or answer they wrote.
    #[error("You cannot vote for yourself!")]
    Voting,

    /// Someone other than the questioner tried to accept an answer.
    #[error("Only {questioner} can accept this answer as it is their question")]
    AnswerAcceptance { questioner: String },

    /// Entity not found (e.g., User, Question, Answer)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Resource already exists or the action clashes with current state
    /// (e.g., duplicate user name, second accepted answer)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Input rejected before reaching the board (e.g., blank user name)
    #[error("validation error: {0}")]
    ValidationError(String),
}

impl AppError {
    pub(crate) fn not_found(kind: &str, id: impl Display) -> Self {
        Self::NotFound(kind.to_string(), id.to_string())
    }
}

/// A specialized Result type for Overboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
