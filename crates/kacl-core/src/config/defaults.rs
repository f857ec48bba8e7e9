//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "kacl.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "kacl.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".kacl.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".kacl.toml",
        ALT_CONFIG_FILE,
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# kacl configuration

changelog:
  file: CHANGELOG.md
  # Accept `### added` or `[yanked]` as if they were written canonically
  allow_inconsistent_case: false
  # Fail when a released version has no date
  enforce_date_is_present: false

lint:
  require_links: true
  require_spec_references: true
  strict: false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_matches_defaults() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_searched_first() {
        assert_eq!(config_file_names()[0], DEFAULT_CONFIG_TOML);
    }
}
