//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, KaclError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Config file syntax, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        if path.extension().is_some_and(|e| e == "toml") {
            Self::Toml
        } else {
            Self::Yaml
        }
    }

    fn parse(self, content: &str) -> Result<Config> {
        let config: Config = match self {
            Self::Toml => toml::from_str(content).map_err(ConfigError::TomlError)?,
            Self::Yaml => serde_yaml::from_str(content).map_err(ConfigError::YamlError)?,
        };
        Ok(config)
    }
}

/// Load and validate a kacl config file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = Format::of(path);
    info!(path = %path.display(), ?format, "loading kacl config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;
    validate_config(&config)?;

    debug!(
        changelog = %config.changelog.file.display(),
        strict = config.lint.strict,
        "kacl config loaded"
    );
    Ok(config)
}

/// Paths a config may live at within one directory, in lookup order
fn candidates(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    config_file_names()
        .into_iter()
        .flat_map(move |name| [dir.join(name), dir.join(".github").join(name)])
}

/// Find the nearest kacl config, walking up from `start_dir`.
///
/// Each directory is checked for every file name, directly and under
/// `.github/`, before moving to its parent.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir
        .ancestors()
        .flat_map(candidates)
        .find(|path| path.is_file());

    match &found {
        Some(path) => info!(path = %path.display(), "found kacl config"),
        None => debug!(start_dir = %start_dir.display(), "no kacl config found"),
    }
    found
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration or use defaults
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    match load_config_from_dir(dir) {
        Ok((config, path)) => (config, Some(path)),
        Err(KaclError::Config(ConfigError::NotFound(_))) => {
            debug!(dir = %dir.display(), "no config file, using defaults");
            (Config::default(), None)
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "config could not be loaded, using defaults");
            (Config::default(), None)
        }
    }
}
