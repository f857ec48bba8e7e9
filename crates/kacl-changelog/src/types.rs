//! Changelog types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Version marker for the in-progress release at the top of a changelog
pub const UNRELEASED: &str = "Unreleased";

/// A complete Keep a Changelog document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    /// The https://keepachangelog.com version referenced by the description
    pub keep_a_changelog_version: Option<String>,
    /// The semantic versioning spec version referenced by the description
    pub semver_version: Option<String>,
    /// Comment lines preceding the title, verbatim
    pub comment_header: Vec<String>,
    /// Document title, usually "Changelog"
    pub title: String,
    /// Free text between the title and the first release
    pub description: Vec<String>,
    /// Releases in file order, newest first by convention
    pub releases: Vec<Release>,
    /// Comparison links at the bottom of the file
    pub links: Vec<Link>,
}

impl Changelog {
    /// Create an empty changelog with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Find a release by version.
    ///
    /// The `Unreleased` marker matches regardless of case, other versions
    /// must match exactly.
    pub fn release(&self, version: &str) -> Option<&Release> {
        if version.eq_ignore_ascii_case(UNRELEASED) {
            return self.unreleased();
        }
        self.releases.iter().find(|r| r.version == version)
    }

    /// The in-progress release, if the changelog has one
    pub fn unreleased(&self) -> Option<&Release> {
        self.releases.iter().find(|r| r.is_unreleased())
    }

    /// The first release that is not `Unreleased`
    pub fn latest_release(&self) -> Option<&Release> {
        self.releases.iter().find(|r| !r.is_unreleased())
    }

    /// Find the comparison link for a version
    pub fn link(&self, version: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.version == version)
    }
}

/// One `##` section of the changelog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Everything following the `##` prefix
    pub title: String,
    /// Version token, e.g. `v1.0.2`, `1.0.3-pre1` or `Unreleased`
    pub version: String,
    /// Release date, never set for `Unreleased`
    pub date: Option<NaiveDate>,
    /// Whether the release was withdrawn, never set for `Unreleased`
    pub yanked: bool,
    /// Lines under `### Added`
    pub added: Vec<String>,
    /// Lines under `### Changed`
    pub changed: Vec<String>,
    /// Lines under `### Deprecated`
    pub deprecated: Vec<String>,
    /// Lines under `### Removed`
    pub removed: Vec<String>,
    /// Lines under `### Fixed`
    pub fixed: Vec<String>,
    /// Lines under `### Security`
    pub security: Vec<String>,
    /// Lines before the first category header
    pub other: Vec<String>,
    /// Every non-blank line of the release, including its header
    pub body: Vec<String>,
}

impl Release {
    /// Create a release with no entries
    pub fn new(version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            title: format!("[{}]", version),
            version,
            ..Self::default()
        }
    }

    /// Set the release date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Mark the release as yanked
    pub fn yanked(mut self) -> Self {
        self.yanked = true;
        self
    }

    /// Check if this is the `Unreleased` section
    pub fn is_unreleased(&self) -> bool {
        self.version.eq_ignore_ascii_case(UNRELEASED)
    }

    /// Entries recorded under a category
    pub fn entries(&self, category: Category) -> &[String] {
        match category {
            Category::Added => &self.added,
            Category::Changed => &self.changed,
            Category::Deprecated => &self.deprecated,
            Category::Removed => &self.removed,
            Category::Fixed => &self.fixed,
            Category::Security => &self.security,
        }
    }

    pub(crate) fn entries_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Added => &mut self.added,
            Category::Changed => &mut self.changed,
            Category::Deprecated => &mut self.deprecated,
            Category::Removed => &mut self.removed,
            Category::Fixed => &mut self.fixed,
            Category::Security => &mut self.security,
        }
    }

    /// Number of entry lines across `other` and every category
    pub fn entry_count(&self) -> usize {
        self.other.len() + Category::ALL.iter().map(|c| self.entries(*c).len()).sum::<usize>()
    }

    /// Check if the release has no entries at all
    pub fn is_empty(&self) -> bool {
        self.other.is_empty() && Category::ALL.iter().all(|c| self.entries(*c).is_empty())
    }
}

/// A `[version]: url` comparison reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Version the link belongs to
    pub version: String,
    /// URL showing the difference to the previous release
    pub url: String,
}

impl Link {
    /// Create a new link
    pub fn new(version: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            url: url.into(),
        }
    }
}

/// Type of change recorded under a `###` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// New features
    Added,
    /// Changes in existing functionality
    Changed,
    /// Soon-to-be removed features
    Deprecated,
    /// Removed features
    Removed,
    /// Bug fixes
    Fixed,
    /// Vulnerabilities
    Security,
}

impl Category {
    /// Every category, in the order they are written out
    pub const ALL: [Category; 6] = [
        Self::Added,
        Self::Changed,
        Self::Deprecated,
        Self::Fixed,
        Self::Removed,
        Self::Security,
    ];

    /// Header name as it appears after `###`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
            Self::Removed => "Removed",
            Self::Fixed => "Fixed",
            Self::Security => "Security",
        }
    }

    /// Case-insensitive lookup
    pub fn from_str_ignore_case(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|c| c.as_str() == s).ok_or(())
    }
}
