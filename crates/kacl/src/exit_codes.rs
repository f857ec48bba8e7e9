//! Exit codes for the CLI

use kacl_core::{ChangelogError, ConfigError, KaclError};

use crate::cli::CliError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Changelog could not be parsed
pub const PARSE_ERROR: i32 = 3;

/// Validation or format check failed
pub const VALIDATION_ERROR: i32 = 5;

/// Pick the exit code for an error returned by a command
pub fn for_error(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if cause.downcast_ref::<ChangelogError>().is_some() {
            return PARSE_ERROR;
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return CONFIG_ERROR;
        }
        if cause.downcast_ref::<CliError>().is_some() {
            return VALIDATION_ERROR;
        }
        match cause.downcast_ref::<KaclError>() {
            Some(KaclError::Changelog(_)) => return PARSE_ERROR,
            Some(KaclError::Config(_)) => return CONFIG_ERROR,
            _ => {}
        }
    }
    ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_parse_errors() {
        let err = anyhow::Error::new(ChangelogError::MissingTitle { line: 1 })
            .context("reading CHANGELOG.md");
        assert_eq!(for_error(&err), PARSE_ERROR);

        let err: anyhow::Error = KaclError::from(ChangelogError::MalformedHeader { line: 2 }).into();
        assert_eq!(for_error(&err), PARSE_ERROR);
    }

    #[test]
    fn test_config_errors() {
        let err: anyhow::Error = KaclError::from(ConfigError::InvalidValue {
            field: "changelog.file".to_string(),
            message: "file cannot be empty".to_string(),
        })
        .into();
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_check_failures() {
        let err: anyhow::Error = CliError::ValidationFailed(2).into();
        assert_eq!(for_error(&err), VALIDATION_ERROR);

        let err = Err::<(), _>(std::io::Error::other("nope"))
            .context("opening file")
            .unwrap_err();
        assert_eq!(for_error(&err), ERROR);
    }
}
