//! # Maze Error Types
//!
//! All errors that can occur while building a maze.

use thiserror::Error;

/// Errors that can occur in maze generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A carve or construction call received bounds that do not fit the grid.
    #[error("invalid argument to {operation}: {reason}")]
    InvalidArgument {
        /// The operation that rejected its arguments.
        operation: &'static str,
        /// What was wrong with them.
        reason: String,
    },

    /// Dead-end elimination kept finding work past its pass budget.
    #[error("dead-end elimination did not converge after {passes} passes")]
    DeadEndsDiverged {
        /// Passes run before giving up.
        passes: usize,
    },

    /// A previous carve failed; the grid must be re-initialized.
    #[error("grid is poisoned by an earlier failed carve")]
    Poisoned,

    /// Invalid level configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MazeError {
    /// Shorthand for [`MazeError::InvalidArgument`].
    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }
}

/// Result type for maze operations.
pub type MazeResult<T> = Result<T, MazeError>;
