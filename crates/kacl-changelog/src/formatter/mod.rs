//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::Changelog;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a whole changelog to string
    fn format(&self, changelog: &Changelog) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}

/// Render a changelog as canonical Keep a Changelog markdown
pub fn render(changelog: &Changelog) -> String {
    MarkdownFormatter::new().format(changelog)
}

impl Changelog {
    /// Render as canonical markdown
    pub fn to_markdown(&self) -> String {
        render(self)
    }
}

impl std::fmt::Display for Changelog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render(self))
    }
}
