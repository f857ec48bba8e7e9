//! Fmt command - rewrite a changelog in canonical layout

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use kacl_changelog::render;

use crate::cli::output::{path_style, success};
use crate::cli::{ChangelogArgs, Cli, CliError};

/// Rewrite a changelog in canonical layout
#[derive(Debug, Args)]
pub struct FmtCommand {
    #[command(flatten)]
    pub changelog: ChangelogArgs,

    /// Verify formatting without applying changes (for CI / hooks)
    #[arg(long, conflicts_with = "write")]
    pub check: bool,

    /// Write the result back to the file instead of printing it
    #[arg(short, long)]
    pub write: bool,
}

impl FmtCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(check = self.check, write = self.write, "executing fmt command");

        let source = self.changelog.resolve()?;
        let original = std::fs::read_to_string(&source.path)
            .with_context(|| format!("Failed to read {}", source.path.display()))?;
        let changelog = source.parse_text(&original)?;
        let formatted = render(&changelog);
        let unchanged = formatted == original;

        debug!(unchanged, bytes = formatted.len(), "changelog rendered");

        if self.check {
            if !unchanged {
                return Err(CliError::NotCanonical(source.path).into());
            }
            if !cli.quiet {
                success(&format!(
                    "{} is canonically formatted",
                    path_style().apply_to(source.path.display())
                ));
            }
            return Ok(());
        }

        if self.write {
            if unchanged {
                if !cli.quiet {
                    success(&format!(
                        "{} already formatted",
                        path_style().apply_to(source.path.display())
                    ));
                }
                return Ok(());
            }

            std::fs::write(&source.path, &formatted)?;
            if !cli.quiet {
                success(&format!(
                    "Formatted {}",
                    path_style().apply_to(source.path.display())
                ));
            }
            return Ok(());
        }

        print!("{}", formatted);
        Ok(())
    }
}
