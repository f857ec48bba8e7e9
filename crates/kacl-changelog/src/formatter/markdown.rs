//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{Category, Changelog, Link, Release};

/// Writes changelogs in canonical Keep a Changelog layout.
///
/// Spacing and category order are fixed, so formatting the result of
/// parsing canonical text gives back the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    /// Format a single release section
    pub fn format_release(&self, release: &Release) -> String {
        let mut output = format!("## [{}]", release.version);

        if let Some(date) = release.date {
            output.push_str(&format!(" - {}", date.format("%Y-%m-%d")));
        }

        if release.yanked {
            output.push_str(" [YANKED]");
        }

        output.push('\n');

        // Lines before the first category header have no header of their own
        for line in &release.other {
            output.push_str(line);
            output.push('\n');
        }

        for category in Category::ALL {
            let entries = release.entries(category);
            if entries.is_empty() {
                continue;
            }

            output.push_str(&format!("\n### {}\n", category));
            for line in entries {
                output.push_str(line);
                output.push('\n');
            }
        }

        output
    }

    /// Format a comparison link
    pub fn format_link(&self, link: &Link) -> String {
        format!("[{}]: {}\n", link.version, link.url)
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, changelog), fields(releases = changelog.releases.len(), links = changelog.links.len()))]
    fn format(&self, changelog: &Changelog) -> String {
        let mut output = String::new();

        for line in &changelog.comment_header {
            output.push_str(line);
            output.push('\n');
        }

        output.push_str(&format!("# {}\n\n", changelog.title));

        for line in &changelog.description {
            output.push_str(line);
            output.push('\n');
        }

        for release in &changelog.releases {
            output.push_str("\n\n");
            output.push_str(&self.format_release(release));
        }

        if !changelog.links.is_empty() {
            output.push_str("\n\n");
            for link in &changelog.links {
                output.push_str(&self.format_link(link));
            }
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::render;
    use crate::parser::{parse_str, ChangelogParser, ParseOptions};
    use chrono::NaiveDate;

    const CANONICAL: &str = r#"<!--
SPDX-FileCopyrightText: 2021 Example Corp
SPDX-License-Identifier: Apache-2.0
-->
# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/)
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).


## [Unreleased]


## [v3.4.0]
- Something that doesn't fit below.

### Added
- Added a new string.
- Added a new line.

### Changed
- Allow use of num_algorithms.
- A few lines related to the ### Fixed field
- I forgot to include this above

### Fixed
- Fixed [issue 55](https://example.com/issue-55)

### Security
- Fixed a buffer overrun issue-1234


## [v3.0.0] - 2020-12-30

### Deprecated
- The Magic() function has been deprecated.

### Removed
- The ReallyMagic() function has been deprecated.


## [v2.1.0] - 2019-12-30 [YANKED]


## [v2.0.0] [YANKED]


[Unreleased]: https://example.com/compare/v3.4.0...HEAD
[v3.4.0]: https://example.com/compare/v3.0.0...v3.4.0
[v3.0.0]: https://example.com/compare/v0.0.0...v3.4.0
"#;

    #[test]
    fn test_round_trip_canonical() {
        let changelog = parse_str(CANONICAL).unwrap();
        assert_eq!(changelog.releases.len(), 5);
        assert_eq!(render(&changelog), CANONICAL);
    }

    #[test]
    fn test_round_trip_minimal() {
        for text in ["# Changelog\n\n", "# Changelog\n\nSome words.\n"] {
            assert_eq!(parse_str(text).unwrap().to_markdown(), text);
        }
    }

    #[test]
    fn test_normalizes_spacing_and_order() {
        let messy = "\n\n# Changelog\n\n\n## [1.0.0]   -   2021-02-03\n\n\n### Security\n- sec\n### Added\n\n- new\n### Fixed\n- bug\n\n\n\n[1.0.0]:   https://example.com/1.0.0\n";
        let expected = "# Changelog\n\n\n\n## [1.0.0] - 2021-02-03\n\n### Added\n- new\n\n### Fixed\n- bug\n\n### Security\n- sec\n\n\n[1.0.0]: https://example.com/1.0.0\n";
        let changelog = parse_str(messy).unwrap();
        let rendered = changelog.to_string();
        assert_eq!(rendered, expected);
        assert_eq!(parse_str(&rendered).unwrap().to_markdown(), expected);
    }

    #[test]
    fn test_lenient_parse_normalizes_category_case() {
        let parser = ChangelogParser::with_options(ParseOptions::lenient());
        let changelog = parser.parse_str("# C\n## [1.0.0]\n### removed\n- old api\n").unwrap();
        assert_eq!(
            render(&changelog),
            "# C\n\n\n\n## [1.0.0]\n\n### Removed\n- old api\n"
        );
    }

    #[test]
    fn test_format_release_header_variants() {
        let formatter = MarkdownFormatter::new();
        let date = NaiveDate::from_ymd_opt(2020, 12, 30).unwrap();

        assert_eq!(formatter.format_release(&Release::new("Unreleased")), "## [Unreleased]\n");
        assert_eq!(
            formatter.format_release(&Release::new("v3.0.0").with_date(date)),
            "## [v3.0.0] - 2020-12-30\n"
        );
        assert_eq!(
            formatter.format_release(&Release::new("v2.1.0").with_date(date).yanked()),
            "## [v2.1.0] - 2020-12-30 [YANKED]\n"
        );
        assert_eq!(
            formatter.format_release(&Release::new("v2.0.0").yanked()),
            "## [v2.0.0] [YANKED]\n"
        );
    }

    #[test]
    fn test_other_entries_have_no_header() {
        let mut release = Release::new("1.0.0");
        release.other.push("Intro text".to_string());
        release.removed.push("- gone".to_string());
        release.fixed.push("- fixed".to_string());

        assert_eq!(
            MarkdownFormatter::new().format_release(&release),
            "## [1.0.0]\nIntro text\n\n### Fixed\n- fixed\n\n### Removed\n- gone\n"
        );
    }

    #[test]
    fn test_format_link() {
        let link = Link::new("v1.0.0", "https://example.com/v1.0.0");
        assert_eq!(
            MarkdownFormatter::new().format_link(&link),
            "[v1.0.0]: https://example.com/v1.0.0\n"
        );
        assert_eq!(MarkdownFormatter::new().extension(), "md");
    }
}
