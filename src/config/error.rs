//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading overrides or validating the configuration.
///
/// Profile selection never fails; these only surface for malformed explicit
/// `SIMILARITY_*` overrides or a model path that is unusable at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Maximum sequence length is not a positive integer.
    #[error("invalid max sequence length '{value}': must be a positive integer")]
    InvalidMaxSeqLen { value: String },

    /// Score output mode is not one of the supported names.
    #[error("invalid score output '{value}': expected 'sigmoid' or 'logit'")]
    InvalidScoreOutput { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
