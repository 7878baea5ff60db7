//! Error types for the Tanuki launcher.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error reading {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    /// Parse error.
    #[error("Parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The host sent a preference id we don't know about.
    #[error("Unknown preference: {0}")]
    UnknownPreference(String),
}
