//! kacl Core - shared error types and configuration
//!
//! This crate provides the error taxonomy and the configuration layer used by
//! the changelog parser and the `kacl` command-line tool.

pub mod config;
pub mod error;

pub use config::{ChangelogConfig, Config, LintConfig};
pub use error::{ChangelogError, ConfigError, KaclError, Result};
