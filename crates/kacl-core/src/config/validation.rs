//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    let file = config.changelog.file.to_string_lossy();

    if file.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.file".to_string(),
            message: "file cannot be empty".to_string(),
        }
        .into());
    }

    if file.ends_with('/') || file.ends_with(std::path::MAIN_SEPARATOR) {
        return Err(ConfigError::InvalidValue {
            field: "changelog.file".to_string(),
            message: "must point to a file, not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
