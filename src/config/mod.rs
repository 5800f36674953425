//! Configuration module
//!
//! Handles loading and saving of alchemist.toml configuration files.
//! Defines Config, Assistant, Output, Limits, and Bootstrap types.

mod types;

pub use types::{Assistant, Config};

use crate::error::{AlchemistError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "alchemist.toml";

/// Load configuration from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        AlchemistError::Config(format!(
            "Cannot read config from '{}': {}. Run 'code-alchemist config init' to create one.",
            path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Resolve the effective configuration
///
/// An explicit path must exist. Without one, `./alchemist.toml` is used when
/// present and built-in defaults otherwise.
pub fn resolve(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load(path),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load(&default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Save configuration to a TOML file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|e| AlchemistError::Config(format!("Failed to serialize config: {}", e)))?;

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, toml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("alchemist.toml");

        let config = Config::default();
        save(&config, &config_path).unwrap();

        let loaded = load(&config_path).unwrap();
        assert_eq!(loaded.assistant.program, "q");
        assert_eq!(loaded.limits.max_listed_files, 50);
    }

    #[test]
    fn test_load_missing_config() {
        let result = load(Path::new("/nonexistent/alchemist.toml"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Run 'code-alchemist config init'"));
    }

    #[test]
    fn test_resolve_explicit_missing_is_error() {
        let result = resolve(Some(Path::new("/nonexistent/alchemist.toml")));
        assert!(matches!(result, Err(AlchemistError::Config(_))));
    }

    #[test]
    fn test_save_creates_directories() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("nested/dir/alchemist.toml");

        save(&Config::default(), &config_path).unwrap();

        assert!(config_path.exists());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("alchemist.toml");
        fs::write(&config_path, "[assistant\nprogram = ").unwrap();

        let result = load(&config_path);
        assert!(matches!(result, Err(AlchemistError::TomlParse(_))));
    }

    #[test]
    fn test_custom_assistant_survives_save() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("alchemist.toml");

        let mut config = Config::default();
        config.assistant.program = "cat".to_string();
        config.assistant.args.clear();
        config.assistant.timeout_secs = 5;

        save(&config, &config_path).unwrap();
        let loaded = load(&config_path).unwrap();

        assert_eq!(loaded.assistant.program, "cat");
        assert!(loaded.assistant.args.is_empty());
        assert_eq!(loaded.assistant.timeout_secs, 5);
    }
}
