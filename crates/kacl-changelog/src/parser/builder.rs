//! Incremental construction of a [`Release`]

use chrono::NaiveDate;
use kacl_core::ChangelogError;
use tracing::debug;

use super::grammar::{self, ReleaseHeader};
use super::types::ParseOptions;
use crate::types::{Category, Release};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accumulates the lines of one release.
///
/// The release under construction is only reachable through
/// [`ReleaseBuilder::build`], which consumes the builder.
#[derive(Debug)]
pub struct ReleaseBuilder {
    release: Release,
    current: Option<Category>,
}

impl ReleaseBuilder {
    /// Start a release from its header line.
    ///
    /// `Unreleased` never carries a date or yanked flag, whatever the header
    /// says, so neither is even validated for it.
    pub fn from_header(
        header: &ReleaseHeader<'_>,
        raw: &str,
        line: usize,
        options: &ParseOptions,
    ) -> Result<Self, ChangelogError> {
        let mut release = Release {
            title: header.title.to_string(),
            version: header.version.to_string(),
            body: vec![raw.to_string()],
            ..Release::default()
        };

        if !release.is_unreleased() {
            if let Some(value) = header.date {
                release.date = Some(parse_date(value, line)?);
            } else if options.enforce_date_is_present {
                return Err(ChangelogError::MissingDate {
                    line,
                    version: release.version,
                });
            }
            release.yanked = header.yanked;
        }

        Ok(Self {
            release,
            current: None,
        })
    }

    /// Switch the category that following entries belong to
    pub fn enter_category(&mut self, category: Category, raw: &str) {
        self.release.body.push(raw.to_string());
        self.current = Some(category);
    }

    /// Record an entry under the current category, or under `other` when no
    /// category header has been seen yet
    pub fn push_entry(&mut self, raw: &str) {
        self.release.body.push(raw.to_string());
        let target = match self.current {
            Some(category) => self.release.entries_mut(category),
            None => &mut self.release.other,
        };
        target.push(raw.to_string());
    }

    /// Seal the release
    pub fn build(self) -> Release {
        debug!(
            version = %self.release.version,
            body_lines = self.release.body.len(),
            "release sealed"
        );
        self.release
    }
}

/// chrono alone accepts `2020-1-1` and two-digit years, so the token
/// shape is checked first.
fn parse_date(value: &str, line: usize) -> Result<NaiveDate, ChangelogError> {
    let invalid = || ChangelogError::InvalidDate {
        line,
        value: value.to_string(),
    };

    if !grammar::is_iso_date(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::grammar::{Grammar, Line};

    fn builder(raw: &str, options: &ParseOptions) -> Result<ReleaseBuilder, ChangelogError> {
        match Grammar::new().classify(raw) {
            Line::Release(header) => ReleaseBuilder::from_header(&header, raw, 7, options),
            other => panic!("expected release header, got {:?}", other),
        }
    }

    #[test]
    fn test_entries_go_to_other_before_any_category() {
        let mut b = builder("## [v1.0.0]", &ParseOptions::default()).unwrap();
        b.push_entry("- loose");
        b.enter_category(Category::Fixed, "### Fixed");
        b.push_entry("- a fix");
        let release = b.build();

        assert_eq!(release.other, vec!["- loose"]);
        assert_eq!(release.fixed, vec!["- a fix"]);
        assert_eq!(release.body, vec!["## [v1.0.0]", "- loose", "### Fixed", "- a fix"]);
    }

    #[test]
    fn test_repeated_category_appends() {
        let mut b = builder("## [v1.0.0]", &ParseOptions::default()).unwrap();
        b.enter_category(Category::Changed, "### Changed");
        b.push_entry("- one");
        b.enter_category(Category::Added, "### Added");
        b.push_entry("- added");
        b.enter_category(Category::Changed, "### Changed");
        b.push_entry("- two");
        let release = b.build();

        assert_eq!(release.changed, vec!["- one", "- two"]);
        assert_eq!(release.added, vec!["- added"]);
    }

    #[test]
    fn test_valid_date() {
        let release = builder("## [v1.0.0] - 2020-01-19", &ParseOptions::default())
            .unwrap()
            .build();
        assert_eq!(release.date, NaiveDate::from_ymd_opt(2020, 1, 19));
    }

    #[test]
    fn test_invalid_date() {
        let err = builder("## [v1.0.0] - 2020-19-01", &ParseOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ChangelogError::InvalidDate { line: 7, ref value } if value == "2020-19-01"
        ));
    }

    #[test]
    fn test_unpadded_or_short_dates_are_invalid() {
        for value in ["2020-1-1", "2020-01-1", "20-01-01"] {
            let raw = format!("## [v1.0.0] - {}", value);
            let err = builder(&raw, &ParseOptions::default()).unwrap_err();
            assert!(
                matches!(err, ChangelogError::InvalidDate { value: ref v, .. } if v == value),
                "{} should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_unreleased_ignores_date_and_yanked() {
        let release = builder("## [unreleased] - 2020-19-01 [YANKED]", &ParseOptions::default())
            .unwrap()
            .build();
        assert_eq!(release.date, None);
        assert!(!release.yanked);
        assert_eq!(release.version, "unreleased");
    }

    #[test]
    fn test_missing_date_when_enforced() {
        let options = ParseOptions::default().with_enforced_dates(true);
        let err = builder("## [v2.0.0] [YANKED]", &options).unwrap_err();
        assert!(matches!(err, ChangelogError::MissingDate { ref version, .. } if version == "v2.0.0"));

        assert!(builder("## [Unreleased]", &options).is_ok());
    }
}
