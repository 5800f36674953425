use crate::config::{self, Config, DEFAULT_CONFIG_FILE};
use crate::display::status;
use crate::error::Result;
use std::path::PathBuf;

/// Initialize alchemist.toml configuration file
pub fn init(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if config_path.exists() {
        status::warning(&format!(
            "Configuration file already exists at: {}",
            config_path.display()
        ));
        status::warning("Remove it first if you want to reinitialize.");
        return Ok(());
    }

    config::save(&Config::default(), &config_path)?;

    println!("Configuration file created: {}", config_path.display());
    println!("\nNext steps:");
    println!(
        "1. Edit [assistant] in {} if your assistant CLI is not `q chat`",
        config_path.display()
    );
    println!("2. Run 'code-alchemist bootstrap' to check your environment");
    println!("3. Run 'code-alchemist demo' for a guided tour");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("alchemist.toml");

        init(Some(path.clone())).unwrap();

        let loaded = config::load(&path).unwrap();
        assert_eq!(loaded.assistant.program, "q");
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("alchemist.toml");
        fs::write(&path, "[assistant]\nprogram = \"custom\"\n").unwrap();

        init(Some(path.clone())).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("custom"));
    }
}
