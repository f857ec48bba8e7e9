//! Line grammar for Keep a Changelog documents
//!
//! Every recognizer lives here so the parser only ever deals with tagged
//! [`Line`] values and never inspects raw text itself.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::Category;

/// `# Title`, but not `## ...`
static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#(?P<title>[^#].*)?$").expect("Invalid regex"));

static RELEASE_REGEX: LazyLock<Regex> = LazyLock::new(|| release_regex("YANKED"));

static RELEASE_REGEX_ANY_CASE: LazyLock<Regex> = LazyLock::new(|| release_regex("(?i:YANKED)"));

static CATEGORY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*###\s*(?P<name>Added|Changed|Deprecated|Fixed|Removed|Security)\s*$")
        .expect("Invalid regex")
});

static CATEGORY_REGEX_ANY_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*###\s*(?P<name>(?i:Added|Changed|Deprecated|Fixed|Removed|Security))\s*$")
        .expect("Invalid regex")
});

static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[(?P<version>[^\]]*)\]\s*:\s*(?P<url>https?://.*?)\s*$")
        .expect("Invalid regex")
});

static COMMENT_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<!--").expect("Invalid regex"));

static COMMENT_CLOSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-->\s*$").expect("Invalid regex"));

/// Zero-padded `YYYY-MM-DD`, the only date shape a release may carry
static ISO_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid regex"));

static SEMVER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://semver\.org/spec/(?P<version>.*?)\.html").expect("Invalid regex")
});

static KEEP_A_CHANGELOG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://keepachangelog\.com/[^/]*/(?P<version>[^/]*)/").expect("Invalid regex")
});

/// The date group is deliberately looser than `YYYY-MM-DD` so that a
/// malformed date surfaces as an error instead of silently turning the
/// header into plain text.
fn release_regex(yanked: &str) -> Regex {
    Regex::new(&format!(
        r"^\s*##\s*(?P<title>\[(?P<version>[^\]]*)\](?:\s*-\s*(?P<date>\d[\d-]*))?\s*(?P<yanked>\[\s*{}\s*\])?)\s*$",
        yanked
    ))
    .expect("Invalid regex")
}

/// A classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace only
    Blank,
    /// `# Title`, holding the trimmed text which may be empty
    Title(&'a str),
    /// `## [version] - date [YANKED]`
    Release(ReleaseHeader<'a>),
    /// `### Added` and friends
    Category(Category),
    /// `[version]: https://...`
    Link { version: &'a str, url: &'a str },
    /// Anything else
    Text,
}

/// Fields captured from a release header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseHeader<'a> {
    /// Everything after `##`
    pub title: &'a str,
    /// Text inside the brackets
    pub version: &'a str,
    /// Raw date token, not yet validated
    pub date: Option<&'a str>,
    /// Whether a `[YANKED]` marker was present
    pub yanked: bool,
}

/// Line classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct Grammar {
    ignore_case: bool,
}

impl Grammar {
    /// Grammar with exact keyword capitalization
    pub fn new() -> Self {
        Self::default()
    }

    /// Grammar that accepts category names and the YANKED marker in any case
    pub fn ignoring_case() -> Self {
        Self { ignore_case: true }
    }

    /// Classify a line.
    ///
    /// Patterns are tried most specific first, so `## [1.0.0]` is a release
    /// and `### Added` a category even though both start with `#`.
    pub fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        if line.trim().is_empty() {
            return Line::Blank;
        }
        if let Some(header) = self.release_header(line) {
            return Line::Release(header);
        }
        if let Some(category) = self.category(line) {
            return Line::Category(category);
        }
        if let Some((version, url)) = link(line) {
            return Line::Link { version, url };
        }
        if let Some(title) = title(line) {
            return Line::Title(title);
        }
        Line::Text
    }

    fn release_header<'a>(&self, line: &'a str) -> Option<ReleaseHeader<'a>> {
        let regex = if self.ignore_case {
            &RELEASE_REGEX_ANY_CASE
        } else {
            &RELEASE_REGEX
        };
        let caps = regex.captures(line)?;

        Some(ReleaseHeader {
            title: caps.name("title")?.as_str().trim(),
            version: caps.name("version")?.as_str(),
            date: caps.name("date").map(|m| m.as_str()),
            yanked: caps.name("yanked").is_some(),
        })
    }

    fn category(&self, line: &str) -> Option<Category> {
        if self.ignore_case {
            let caps = CATEGORY_REGEX_ANY_CASE.captures(line)?;
            Category::from_str_ignore_case(caps.name("name")?.as_str())
        } else {
            let caps = CATEGORY_REGEX.captures(line)?;
            caps.name("name")?.as_str().parse().ok()
        }
    }
}

fn title(line: &str) -> Option<&str> {
    let caps = TITLE_REGEX.captures(line)?;
    Some(caps.name("title").map_or("", |m| m.as_str().trim()))
}

fn link(line: &str) -> Option<(&str, &str)> {
    let caps = LINK_REGEX.captures(line)?;
    Some((caps.name("version")?.as_str(), caps.name("url")?.as_str()))
}

/// Check if a line starts an HTML comment
pub fn opens_comment(line: &str) -> bool {
    COMMENT_OPEN_REGEX.is_match(line)
}

/// Check if a line ends an HTML comment
pub fn closes_comment(line: &str) -> bool {
    COMMENT_CLOSE_REGEX.is_match(line)
}

/// Check that a date token has the fixed `YYYY-MM-DD` shape.
///
/// Calendar validity is checked separately; this only rules out unpadded
/// fields and short years.
pub fn is_iso_date(token: &str) -> bool {
    ISO_DATE_REGEX.is_match(token)
}

/// Version of the SemVer spec referenced in `text`, e.g. `v2.0.0`
pub fn semver_version(text: &str) -> Option<String> {
    SEMVER_REGEX
        .captures(text)
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str().to_string())
}

/// Version of Keep a Changelog referenced in `text`, e.g. `1.0.0`
pub fn keep_a_changelog_version(text: &str) -> Option<String> {
    KEEP_A_CHANGELOG_REGEX
        .captures(text)
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str().to_string())
}
