//! Changelog parsing
//!
//! Reads a Keep a Changelog markdown document line by line through four
//! phases: header comments, title and description, releases, and links.

mod builder;
pub mod grammar;
mod machine;
mod types;

pub use builder::ReleaseBuilder;
pub use machine::Phase;
pub use types::*;

use std::io::BufRead;
use std::str::FromStr;

use kacl_core::ChangelogError;
use tracing::{info, instrument};

use crate::types::Changelog;
use machine::Machine;

/// Parser for Keep a Changelog documents
#[derive(Debug, Clone, Default)]
pub struct ChangelogParser {
    options: ParseOptions,
}

impl ChangelogParser {
    /// Create a new parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a changelog from any buffered reader.
    ///
    /// Nothing is returned unless the whole stream parses.
    #[instrument(skip(self, reader), fields(options = ?self.options))]
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Changelog, ChangelogError> {
        let mut machine = Machine::new(self.options);

        for line in reader.lines() {
            machine.feed(&line?)?;
        }

        let changelog = machine.finish()?;
        info!(
            title = %changelog.title,
            releases = changelog.releases.len(),
            links = changelog.links.len(),
            "parsed changelog"
        );
        Ok(changelog)
    }

    /// Parse a changelog held in memory
    pub fn parse_str(&self, text: &str) -> Result<Changelog, ChangelogError> {
        self.parse(text.as_bytes())
    }
}

/// Parse a changelog from a reader
pub fn parse<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Changelog, ChangelogError> {
    ChangelogParser::with_options(*options).parse(reader)
}

/// Parse a changelog from a string with default options
pub fn parse_str(text: &str) -> Result<Changelog, ChangelogError> {
    ChangelogParser::new().parse_str(text)
}

impl FromStr for Changelog {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}
