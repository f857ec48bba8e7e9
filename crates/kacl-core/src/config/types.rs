//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for kacl
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Changelog reading configuration
    pub changelog: ChangelogConfig,

    /// Lint configuration
    pub lint: LintConfig,
}

/// Changelog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Match category headers and the YANKED marker regardless of case
    pub allow_inconsistent_case: bool,

    /// Require every released version to carry a date
    pub enforce_date_is_present: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            allow_inconsistent_case: false,
            enforce_date_is_present: false,
        }
    }
}

/// Lint configuration used by `kacl validate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Warn when a released version has no comparison link
    pub require_links: bool,

    /// Warn when the description does not reference Keep a Changelog and SemVer
    pub require_spec_references: bool,

    /// Treat warnings as errors
    pub strict: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            require_links: true,
            require_spec_references: true,
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[changelog]\nenforce_date_is_present = true\n").unwrap();
        assert!(config.changelog.enforce_date_is_present);
        assert!(!config.changelog.allow_inconsistent_case);
        assert_eq!(config.changelog.file, PathBuf::from("CHANGELOG.md"));
        assert!(config.lint.require_links);
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = Config::default();
        config.lint.strict = true;
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
