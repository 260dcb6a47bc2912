//! Error types for the editor core.

use std::fmt;

use thiserror::Error;

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Why a pending dialog request settled without a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user pressed "Cancel".
    Explicit,
    /// The dialog was closed without an explicit action (e.g. a click outside).
    Dismissed,
    /// A newer request replaced this one before it settled.
    Superseded,
    /// The controller went away before the request settled.
    Dropped,
    /// The comment being replied to was removed before the reply was confirmed.
    ParentMissing,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CancelReason::Explicit => "cancelled",
            CancelReason::Dismissed => "dismissed",
            CancelReason::Superseded => "superseded by a newer request",
            CancelReason::Dropped => "dropped",
            CancelReason::ParentMissing => "parent comment no longer exists",
        };
        f.write_str(s)
    }
}

/// Errors that can occur in the editor core.
///
/// Unknown comment ids are not errors: tree mutations that miss are no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A comment dialog request settled without producing a comment.
    #[error("Comment dialog {0}")]
    Cancelled(CancelReason),

    /// Confirm/cancel was called while no dialog request is open.
    #[error("No comment dialog is open")]
    DialogNotOpen,

    /// A required dialog field was empty after trimming.
    #[error("Field must not be empty: {0}")]
    EmptyField(&'static str),

    /// A filter name that is not `all`, `resolved` or `unresolved`.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// A command title or identifier that is not in the catalog.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EditorError {
    /// Creates a Cancelled error.
    pub fn cancelled(reason: CancelReason) -> Self {
        Self::Cancelled(reason)
    }

    /// Creates an UnknownFilter error.
    pub fn unknown_filter(name: impl Into<String>) -> Self {
        Self::UnknownFilter(name.into())
    }

    /// Creates an UnknownCommand error.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand(name.into())
    }

    /// Creates a Serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns true if this error only means "the user did not create a comment".
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
