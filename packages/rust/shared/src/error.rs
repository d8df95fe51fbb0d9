//! Error types for the standings generator.
//!
//! Library crates use [`StandingsError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::Division;

/// Top-level error type for all standings operations.
#[derive(Debug, thiserror::Error)]
pub enum StandingsError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Text or number parsing error while reading a standings table.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The PDF could not be opened or its text could not be extracted.
    #[error("PDF error at {path:?}: {message}")]
    Pdf { path: PathBuf, message: String },

    /// No `J<N> - *.pdf` report exists for a division.
    #[error("no matchday PDF found for {division} in {dir:?}")]
    NoMatchdayFile { division: Division, dir: PathBuf },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (unknown division, empty table, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// HTML rendering error.
    #[error("render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StandingsError>;

impl StandingsError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a PDF extraction error for the given file.
    pub fn pdf(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Pdf {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = StandingsError::config("missing docs_dir");
        assert_eq!(err.to_string(), "config error: missing docs_dir");

        let err = StandingsError::parse("position '99999999999' out of range");
        assert!(err.to_string().contains("99999999999"));
    }

    #[test]
    fn no_matchday_names_division() {
        let err = StandingsError::NoMatchdayFile {
            division: Division::Honor,
            dir: PathBuf::from("resources/docs/honor"),
        };
        let msg = err.to_string();
        assert!(msg.contains("honor"));
        assert!(msg.contains("resources/docs/honor"));
    }
}
