//! Validate command

use clap::Args;
use console::style;
use tracing::info;

use kacl_changelog::{validate_changelog, ValidationResult};
use kacl_core::config::validation::validate_config;
use kacl_core::LintConfig;

use crate::cli::output::path_style;
use crate::cli::{ChangelogArgs, Cli, CliError, OutputFormat};

/// Check a changelog for structural problems
#[derive(Debug, Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub changelog: ChangelogArgs,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    /// Lint settings from config, with `--strict` layered on top
    fn lint_config(&self, config: &LintConfig) -> LintConfig {
        LintConfig {
            strict: config.strict || self.strict,
            ..config.clone()
        }
    }

    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = self.strict, "executing validate command");

        let source = self.changelog.resolve()?;
        validate_config(&source.config)?;
        let changelog = source.parse()?;

        let result = validate_changelog(&changelog, &self.lint_config(&source.config.lint));

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": result.passed,
                    "file": source.path.to_string_lossy(),
                    "releases": changelog.releases.len(),
                    "errors": result.errors,
                    "warnings": result.warnings,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();
                    println!("Changelog: {}", path_style().apply_to(source.path.display()));
                    println!();
                    print!("{}", report(&result));
                }
            }
        }

        if !result.passed {
            return Err(CliError::ValidationFailed(result.errors.len()).into());
        }

        Ok(())
    }
}

fn report(result: &ValidationResult) -> String {
    let mut out = String::new();

    if !result.errors.is_empty() {
        out.push_str(&format!("{}\n", style("Errors:").red().bold()));
        for error in &result.errors {
            out.push_str(&format!("  {} {}\n", style("✗").red(), error));
        }
        out.push('\n');
    }

    if !result.warnings.is_empty() {
        out.push_str(&format!("{}\n", style("Warnings:").yellow().bold()));
        for warning in &result.warnings {
            out.push_str(&format!("  {} {}\n", style("!").yellow(), warning));
        }
        out.push('\n');
    }

    if result.passed {
        if result.warnings.is_empty() {
            out.push_str(&format!("{}\n", style("✓ All checks passed").green().bold()));
        } else {
            out.push_str(&format!(
                "{} with {} warning(s)\n",
                style("✓ Validation passed").green().bold(),
                result.warnings.len()
            ));
        }
    } else {
        out.push_str(&format!(
            "{} with {} error(s)\n",
            style("✗ Validation failed").red().bold(),
            result.errors.len()
        ));
    }

    out
}
