//! Error types, exit codes and structured error output.

use std::io;

use serde::Serialize;
use thiserror::Error;

/// Error returned by a picking session.
#[derive(Debug, Error)]
pub enum PickError {
    /// The input list was empty; nothing was rendered.
    #[error("no choices to choose from")]
    NoChoices,

    /// The user aborted, or confirmed while nothing was visible.
    #[error("no choice was selected")]
    NoSelection,

    /// The terminal could not be set up, drawn to or read from.
    #[error("display surface error: {0}")]
    Surface(#[from] io::Error),

    /// An internal invariant was broken.
    #[error("internal fault: {0}")]
    Internal(String),
}

/// Result type for picking operations.
pub type PickResult<T> = Result<T, PickError>;

/// Exit codes for the listpick binary.
///
/// - 0: Success (a choice was confirmed)
/// - 1: General error (terminal failure, bad config, internal fault)
/// - 2: No selection (the user aborted)
/// - 3: No choices (empty input list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// A choice was confirmed.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// The user aborted or nothing was selectable.
    NoSelection = 2,
    /// The input list was empty.
    NoChoices = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "LP000",
            Self::GeneralError => "LP001",
            Self::NoSelection => "LP002",
            Self::NoChoices => "LP003",
        }
    }

    /// Pick the exit code for an application error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<PickError>() {
            Some(PickError::NoSelection) => Self::NoSelection,
            Some(PickError::NoChoices) => Self::NoChoices,
            _ => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "LP001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the user ended the session without choosing
    pub aborted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            aborted: exit_code == ExitCode::NoSelection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_error_display() {
        assert_eq!(PickError::NoChoices.to_string(), "no choices to choose from");
        assert_eq!(PickError::NoSelection.to_string(), "no choice was selected");

        let surface = PickError::Surface(io::Error::other("tty gone"));
        assert!(surface.to_string().contains("display surface error"));
    }

    #[test]
    fn test_exit_code_for_error() {
        let err = anyhow::Error::new(PickError::NoSelection);
        assert_eq!(ExitCode::for_error(&err), ExitCode::NoSelection);

        let err = anyhow::Error::new(PickError::NoChoices).context("reading choices");
        assert_eq!(ExitCode::for_error(&err), ExitCode::NoChoices);

        let err = anyhow::anyhow!("something else");
        assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    }

    #[test]
    fn test_structured_error() {
        let err = anyhow::Error::new(PickError::NoSelection);
        let structured = StructuredError::new(&err, ExitCode::NoSelection);
        assert_eq!(structured.code, "LP002");
        assert_eq!(structured.exit_code, 2);
        assert!(structured.aborted);

        let json = serde_json::to_string(&structured).unwrap();
        assert!(json.contains("\"code\":\"LP002\""));
    }
}
