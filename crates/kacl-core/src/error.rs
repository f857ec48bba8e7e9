//! Error types for kacl

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using KaclError
pub type Result<T> = std::result::Result<T, KaclError>;

/// Main error type for kacl operations
#[derive(Debug, Error)]
pub enum KaclError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading a changelog.
///
/// Every variant is fatal: a parse that hits one of these returns no
/// document at all.
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Content outside of a comment block appears before the title
    #[error("Malformed header at line {line}: only comments may precede the title")]
    MalformedHeader { line: usize },

    /// The stream ended before a title was found, or the title was blank
    #[error("Missing title at line {line}: expected a non-empty '# <title>' line")]
    MissingTitle { line: usize },

    /// A release date that is not a valid YYYY-MM-DD calendar date
    #[error("Invalid date found at line {line}: YYYY-MM-DD is required, '{value}' found")]
    InvalidDate { line: usize, value: String },

    /// A released version without a date while dates are enforced
    #[error("Missing date at line {line}: release '{version}' has no YYYY-MM-DD date")]
    MissingDate { line: usize, version: String },

    /// The underlying reader failed
    #[error("Failed to read changelog stream: {0}")]
    Stream(#[from] std::io::Error),
}

impl ChangelogError {
    /// Line number the error refers to, when there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedHeader { line }
            | Self::MissingTitle { line }
            | Self::InvalidDate { line, .. }
            | Self::MissingDate { line, .. } => Some(*line),
            Self::Stream(_) => None,
        }
    }
}
