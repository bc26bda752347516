//! Error types for coursecraft.
//!
//! Library crates use [`CoursecraftError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.
//!
//! The analysis engine itself never fails on malformed outline text —
//! unparseable lines degrade to being ignored. Errors here cover the
//! boundaries: configuration, input decoding, and filesystem access.

use std::path::PathBuf;

/// Top-level error type for all coursecraft operations.
#[derive(Debug, thiserror::Error)]
pub enum CoursecraftError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Caller supplied input the engine cannot accept (non-UTF-8 outline,
    /// unreadable stdin). Fails fast instead of silently coercing.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CoursecraftError>;

impl CoursecraftError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an invalid-input error from any displayable message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
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
        let err = CoursecraftError::config("missing defaults section");
        assert_eq!(err.to_string(), "config error: missing defaults section");

        let err = CoursecraftError::invalid_input("outline is not valid UTF-8");
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
