//! kacl Changelog - Keep a Changelog parsing and rendering
//!
//! This crate reads changelogs written in the Keep a Changelog convention
//! into a [`Changelog`] model and writes that model back out as canonical
//! markdown.
//!
//! ```
//! use kacl_changelog::{parse_str, render};
//!
//! let text = "# Changelog\n\n\n\n## [1.0.0] - 2021-01-01\n\n### Added\n- First release\n";
//! let changelog = parse_str(text).unwrap();
//! assert_eq!(changelog.releases[0].added.len(), 1);
//! assert_eq!(render(&changelog), text);
//! ```

pub mod formatter;
pub mod parser;
pub mod types;
pub mod validation;

pub use formatter::{render, ChangelogFormatter, MarkdownFormatter};
pub use parser::{parse, parse_str, ChangelogParser, ParseOptions};
pub use types::{Category, Changelog, Link, Release, UNRELEASED};
pub use validation::{validate_changelog, ValidationResult};

pub use kacl_core::ChangelogError;
