//! Structural checks on a parsed changelog

use std::collections::HashSet;

use kacl_core::LintConfig;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use crate::types::Changelog;

/// Validation result
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub passed: bool,
    /// List of errors
    pub errors: Vec<String>,
    /// List of warnings
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result
    pub fn pass() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.passed = false;
        self.errors.push(error.into());
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Promote all warnings to errors
    pub fn promote_warnings(&mut self) {
        if !self.warnings.is_empty() {
            self.passed = false;
            self.errors.append(&mut self.warnings);
        }
    }
}

/// Check a changelog for structural problems the parser tolerates
#[instrument(skip_all, fields(releases = changelog.releases.len(), links = changelog.links.len()))]
pub fn validate_changelog(changelog: &Changelog, config: &LintConfig) -> ValidationResult {
    let mut result = ValidationResult::pass();

    check_versions(changelog, &mut result);
    check_links(changelog, config, &mut result);
    check_dates(changelog, &mut result);

    if config.require_spec_references {
        if changelog.keep_a_changelog_version.is_none() {
            result.add_warning("Description does not reference a Keep a Changelog version");
        }
        if changelog.semver_version.is_none() {
            result.add_warning("Description does not reference a Semantic Versioning version");
        }
    }

    if config.strict {
        result.promote_warnings();
    }

    debug!(
        passed = result.passed,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "changelog validated"
    );
    result
}

fn check_versions(changelog: &Changelog, result: &mut ValidationResult) {
    let mut seen = HashSet::new();

    for (index, release) in changelog.releases.iter().enumerate() {
        if release.version.trim().is_empty() {
            result.add_error(format!("Release #{} has an empty version", index + 1));
            continue;
        }

        if !seen.insert(release.version.to_lowercase()) {
            result.add_error(format!("Version '{}' appears more than once", release.version));
        }

        if release.is_unreleased() && index != 0 {
            result.add_error(format!(
                "'{}' must be the first release, found at position {}",
                release.version,
                index + 1
            ));
        }
    }
}

fn check_links(changelog: &Changelog, config: &LintConfig, result: &mut ValidationResult) {
    for link in &changelog.links {
        if let Err(e) = Url::parse(&link.url) {
            result.add_error(format!(
                "Link for '{}' has an invalid URL '{}': {}",
                link.version, link.url, e
            ));
        }

        if changelog.release(&link.version).is_none() {
            result.add_warning(format!(
                "Link '{}' does not match any release",
                link.version
            ));
        }
    }

    if config.require_links {
        for release in changelog.releases.iter().filter(|r| !r.is_unreleased()) {
            if changelog.link(&release.version).is_none() {
                result.add_warning(format!(
                    "Release '{}' has no comparison link",
                    release.version
                ));
            }
        }
    }
}

/// Releases are listed newest first, so dates must never increase
fn check_dates(changelog: &Changelog, result: &mut ValidationResult) {
    let dated = changelog
        .releases
        .iter()
        .filter_map(|r| r.date.map(|d| (r, d)))
        .collect::<Vec<_>>();

    for pair in dated.windows(2) {
        let (newer, newer_date) = pair[0];
        let (older, older_date) = pair[1];
        if older_date > newer_date {
            result.add_warning(format!(
                "Release '{}' ({}) is listed above '{}' ({}) but is older",
                newer.version, newer_date, older.version, older_date
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    const VALID: &str = "# Changelog\n\
        Based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/) and \
        [SemVer](https://semver.org/spec/v2.0.0.html).\n\
        ## [Unreleased]\n\
        ## [1.1.0] - 2021-06-01\n\
        ### Added\n\
        - thing\n\
        ## [1.0.0] - 2021-01-01\n\
        [Unreleased]: https://example.com/compare/1.1.0...HEAD\n\
        [1.1.0]: https://example.com/compare/1.0.0...1.1.0\n\
        [1.0.0]: https://example.com/releases/1.0.0\n";

    #[test]
    fn test_valid_changelog_passes() {
        let changelog = parse_str(VALID).unwrap();
        let result = validate_changelog(&changelog, &LintConfig::default());
        assert!(result.passed, "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
    }

    #[test]
    fn test_duplicate_versions() {
        let changelog = parse_str("# C\n## [1.0.0]\n## [1.0.0]\n").unwrap();
        let result = validate_changelog(&changelog, &LintConfig::default());
        assert!(!result.passed);
        assert!(result.errors.iter().any(|e| e.contains("more than once")));
    }

    #[test]
    fn test_unreleased_must_be_first() {
        let changelog = parse_str("# C\n## [1.0.0]\n## [Unreleased]\n").unwrap();
        let result = validate_changelog(&changelog, &LintConfig::default());
        assert!(result.errors.iter().any(|e| e.contains("must be the first")));
    }

    #[test]
    fn test_link_checks() {
        let changelog =
            parse_str("# C\n## [1.0.0]\n## [0.9.0]\n[1.0.0]: https://\n[0.1.0]: https://example.com\n")
                .unwrap();
        let result = validate_changelog(&changelog, &LintConfig::default());

        assert!(result.errors.iter().any(|e| e.contains("invalid URL")));
        assert!(result.warnings.iter().any(|w| w.contains("'0.1.0' does not match")));
        assert!(result.warnings.iter().any(|w| w.contains("'0.9.0' has no comparison link")));
    }

    #[test]
    fn test_date_order() {
        let changelog =
            parse_str("# C\n## [1.1.0] - 2020-01-01\n## [1.0.0]\n## [0.9.0] - 2021-01-01\n").unwrap();
        let result = validate_changelog(&changelog, &LintConfig::default());
        assert!(result.warnings.iter().any(|w| w.contains("'1.1.0'") && w.contains("older")));
    }

    #[test]
    fn test_relaxed_and_strict_config() {
        let changelog = parse_str("# C\n## [1.0.0]\n").unwrap();

        let relaxed = LintConfig {
            require_links: false,
            require_spec_references: false,
            strict: false,
        };
        let result = validate_changelog(&changelog, &relaxed);
        assert!(result.passed);
        assert!(result.warnings.is_empty());

        let strict = LintConfig {
            strict: true,
            ..LintConfig::default()
        };
        let result = validate_changelog(&changelog, &strict);
        assert!(!result.passed);
        assert!(result.warnings.is_empty());
        assert_eq!(result.errors.len(), 3);
    }
}
