//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use kacl_changelog::{Changelog, ChangelogParser, ParseOptions};
use kacl_core::config::{load_config_or_default, Config};

use commands::{CompletionsCommand, FmtCommand, InitCommand, ShowCommand, ValidateCommand};

/// kacl - Keep a Changelog toolkit
#[derive(Debug, Parser)]
#[command(name = "kacl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize a changelog
    Show(ShowCommand),

    /// Rewrite a changelog in canonical layout
    Fmt(FmtCommand),

    /// Check a changelog for structural problems
    Validate(ValidateCommand),

    /// Create a kacl configuration file
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Show(ref cmd) => cmd.execute(&self),
            Commands::Fmt(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

/// Failures that are reported results rather than broken input
#[derive(Debug, Error)]
pub enum CliError {
    /// `validate` found errors
    #[error("Changelog validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// `fmt --check` found a difference
    #[error("{0} is not in canonical format")]
    NotCanonical(PathBuf),
}

/// Arguments shared by commands that read a changelog
#[derive(Debug, Clone, Default, Args)]
pub struct ChangelogArgs {
    /// Changelog file (defaults to the configured file, usually CHANGELOG.md)
    pub file: Option<PathBuf>,

    /// Accept category headers and YANKED markers in any case
    #[arg(long)]
    pub allow_inconsistent_case: bool,

    /// Fail when a released version has no date
    #[arg(long)]
    pub require_dates: bool,
}

/// Where a changelog lives and how to read it
#[derive(Debug)]
pub struct ChangelogSource {
    /// Resolved changelog path
    pub path: PathBuf,
    /// Loaded (or default) configuration
    pub config: Config,
    /// Parser configured from config and flags
    pub parser: ChangelogParser,
}

impl ChangelogSource {
    /// Stream the changelog file through the parser
    pub fn parse(&self) -> anyhow::Result<Changelog> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        self.parser
            .parse(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    /// Parse changelog text that was already read
    pub fn parse_text(&self, text: &str) -> anyhow::Result<Changelog> {
        self.parser
            .parse_str(text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

impl ChangelogArgs {
    /// Resolve the file and parse options from config and flags
    pub fn resolve(&self) -> anyhow::Result<ChangelogSource> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd);

        let path = match &self.file {
            Some(file) => cwd.join(file),
            None => cwd.join(&config.changelog.file),
        };

        // Flags only switch options on, never off
        let mut options = ParseOptions::from(&config.changelog);
        if self.allow_inconsistent_case {
            options = options.with_inconsistent_case(true);
        }
        if self.require_dates {
            options = options.with_enforced_dates(true);
        }

        debug!(
            path = %path.display(),
            config = ?config_path,
            options = ?options,
            "resolved changelog source"
        );

        Ok(ChangelogSource {
            path,
            config,
            parser: ChangelogParser::with_options(options),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["kacl", "--format", "json", "-q", "show", "HISTORY.md"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        match cli.command {
            Commands::Show(cmd) => {
                assert_eq!(cmd.changelog.file, Some(PathBuf::from("HISTORY.md")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_source_parses_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");
        std::fs::write(&path, "# Changelog\n## [1.0.0] - 2021-01-01\n- first\n").unwrap();

        let source = ChangelogSource {
            path,
            config: Config::default(),
            parser: ChangelogParser::new(),
        };
        let changelog = source.parse().unwrap();
        assert_eq!(changelog.releases.len(), 1);
    }

    #[test]
    fn test_source_reports_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let source = ChangelogSource {
            path: temp.path().join("missing.md"),
            config: Config::default(),
            parser: ChangelogParser::new(),
        };
        let err = source.parse().unwrap_err();
        assert!(err.to_string().contains("missing.md"));
    }
}
