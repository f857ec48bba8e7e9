//! Parser configuration types

use kacl_core::ChangelogConfig;

/// Options controlling how strictly a changelog is read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Match category headers and the YANKED marker regardless of case
    pub allow_inconsistent_case: bool,
    /// Reject released versions that have no date
    pub enforce_date_is_present: bool,
}

impl ParseOptions {
    /// Options that accept mixed-case keywords
    pub fn lenient() -> Self {
        Self {
            allow_inconsistent_case: true,
            enforce_date_is_present: false,
        }
    }

    /// Set whether keyword case is ignored
    pub fn with_inconsistent_case(mut self, allow: bool) -> Self {
        self.allow_inconsistent_case = allow;
        self
    }

    /// Set whether released versions must be dated
    pub fn with_enforced_dates(mut self, enforce: bool) -> Self {
        self.enforce_date_is_present = enforce;
        self
    }
}

impl From<&ChangelogConfig> for ParseOptions {
    fn from(config: &ChangelogConfig) -> Self {
        Self {
            allow_inconsistent_case: config.allow_inconsistent_case,
            enforce_date_is_present: config.enforce_date_is_present,
        }
    }
}
