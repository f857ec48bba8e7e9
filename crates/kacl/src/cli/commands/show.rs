//! Show command

use clap::Args;
use console::style;
use tracing::info;

use kacl_changelog::{Category, Changelog, Release};

use crate::cli::output::{header, key_value, path_style, version_style};
use crate::cli::{ChangelogArgs, Cli, OutputFormat};

/// Summarize a changelog
#[derive(Debug, Args)]
pub struct ShowCommand {
    #[command(flatten)]
    pub changelog: ChangelogArgs,

    /// Only show this release (use "unreleased" for the Unreleased section)
    #[arg(short, long, value_name = "VERSION")]
    pub release: Option<String>,
}

impl ShowCommand {
    /// Execute the show command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(release = ?self.release, "executing show command");
        let source = self.changelog.resolve()?;
        let changelog = source.parse()?;

        if let Some(version) = &self.release {
            let release = changelog
                .release(version)
                .ok_or_else(|| anyhow::anyhow!("Release '{}' not found", version))?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(release)?),
                OutputFormat::Text => print!("{}", release_details(release)),
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&changelog)?),
            OutputFormat::Text => {
                if cli.quiet {
                    return Ok(());
                }
                println!(
                    "{}",
                    key_value("File", &path_style().apply_to(source.path.display()).to_string())
                );
                print!("{}", summary(&changelog, cli.verbose));
            }
        }

        Ok(())
    }
}

/// One-screen overview of a changelog
fn summary(changelog: &Changelog, verbose: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", header(&changelog.title)));
    if let Some(v) = &changelog.keep_a_changelog_version {
        out.push_str(&format!("{}\n", key_value("Keep a Changelog", v)));
    }
    if let Some(v) = &changelog.semver_version {
        out.push_str(&format!("{}\n", key_value("Semantic Versioning", v)));
    }
    if let Some(latest) = changelog.latest_release() {
        out.push_str(&format!(
            "{}\n",
            key_value("Latest", &version_style().apply_to(&latest.version).to_string())
        ));
    }

    out.push_str(&format!(
        "\n{}\n",
        header(&format!("Releases ({})", changelog.releases.len()))
    ));
    for release in &changelog.releases {
        out.push_str(&format!("  {}\n", release_line(release)));
        if verbose {
            for line in release_details(release).lines().skip(1) {
                out.push_str(&format!("    {}\n", line));
            }
        }
    }

    if !changelog.links.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            header(&format!("Links ({})", changelog.links.len()))
        ));
        for link in &changelog.links {
            out.push_str(&format!("{}\n", key_value(&link.version, &link.url)));
        }
    }

    out
}

fn release_line(release: &Release) -> String {
    let mut line = format!("{:<16}", version_style().apply_to(&release.version));

    match release.date {
        Some(date) => line.push_str(&format!(" {}", date)),
        None => line.push_str(&format!(" {:<10}", "")),
    }

    line.push_str(&format!(" {:>3} entries", release.entry_count()));

    if release.yanked {
        line.push_str(&format!(" {}", style("[YANKED]").red()));
    }

    line
}

/// Header line followed by every entry grouped by category
fn release_details(release: &Release) -> String {
    let mut out = format!("{}\n", release_line(release));

    for line in &release.other {
        out.push_str(&format!("{}\n", line));
    }

    for category in Category::ALL {
        let entries = release.entries(category);
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("{}\n", style(category.as_str()).bold()));
        for line in entries {
            out.push_str(&format!("  {}\n", line.trim()));
        }
    }

    out
}
