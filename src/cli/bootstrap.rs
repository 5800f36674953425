use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::assistant::Runner;
use crate::config::{self, Config, DEFAULT_CONFIG_FILE};
use crate::display::status;
use crate::error::{AlchemistError, Result};

/// Name of the symlink placed in `--link-dir`
const LINK_NAME: &str = "code-alchemist";

#[derive(Debug, Clone, Args)]
pub struct BootstrapArgs {
    /// Directory to place a `code-alchemist` symlink in (e.g. ~/.local/bin)
    #[arg(long)]
    pub link_dir: Option<PathBuf>,

    /// Run the assistant's own login flow
    #[arg(long)]
    pub login: bool,
}

/// Resolve every tool on PATH, failing on the first one missing
pub fn check_required_tools(tools: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::with_capacity(tools.len());
    for tool in tools {
        match which::which(tool) {
            Ok(path) => {
                status::success(&format!("✓ Found {} at {}", tool, path.display()));
                found.push(path);
            }
            Err(e) => {
                debug!("Lookup of {} failed: {}", tool, e);
                status::failure(&format!("✗ {} is required but was not found on PATH", tool));
                return Err(AlchemistError::MissingDependency(tool.clone()));
            }
        }
    }
    Ok(found)
}

/// Point `<dir>/code-alchemist` at the running executable
#[cfg(unix)]
fn link_executable(dir: &Path) -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    fs::create_dir_all(dir)?;

    let link = dir.join(LINK_NAME);
    if let Ok(metadata) = fs::symlink_metadata(&link) {
        if !metadata.file_type().is_symlink() {
            return Err(AlchemistError::Config(format!(
                "'{}' exists and is not a symlink",
                link.display()
            )));
        }
        fs::remove_file(&link)?;
    }

    std::os::unix::fs::symlink(&exe, &link)?;
    Ok(link)
}

#[cfg(not(unix))]
fn link_executable(_dir: &Path) -> Result<PathBuf> {
    Err(AlchemistError::Unsupported(
        "Symlinks are only created on Unix platforms.".to_string(),
    ))
}

/// Create scaffold directories and a default config when none exists
fn scaffold_workspace(config: &Config, config_path: &Path) -> Result<()> {
    for dir in &config.bootstrap.scaffold_dirs {
        fs::create_dir_all(dir)?;
        info!("Ensured directory {}", dir.display());
    }

    if !config_path.exists() {
        config::save(config, config_path)?;
        status::success(&format!("Created {}", config_path.display()));
    }

    Ok(())
}

/// Check the environment and prepare a working directory
pub async fn run(
    config: &Config,
    config_path: Option<&Path>,
    runner: &Runner<'_>,
    args: &BootstrapArgs,
) -> Result<()> {
    status::header("🧪 Setting up Code Alchemist...");

    check_required_tools(&config.bootstrap.required_tools)?;

    let program = runner.program().to_string();
    check_required_tools(std::slice::from_ref(&program))?;
    match runner.version().await {
        Ok(version) => info!("Assistant CLI version: {}", version),
        Err(e) => status::warning(&format!("Could not read assistant version: {}", e)),
    }

    if let Some(dir) = &args.link_dir {
        match link_executable(dir) {
            Ok(link) => status::success(&format!("Linked {}", link.display())),
            Err(e) => status::warning(&format!("Warning: could not create symlink: {}", e)),
        }
    }

    if args.login {
        status::progress("Starting assistant login...");
        match runner.login().await {
            Ok(()) => status::success("Assistant login completed"),
            Err(e) => status::warning(&format!(
                "Warning: login failed ({}). Run '{} {}' manually.",
                e,
                program,
                config.assistant.login_args.join(" ")
            )),
        }
    }

    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    scaffold_workspace(config, &config_path)?;

    status::success("Setup complete! Try 'code-alchemist demo' next.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_tool_stops_at_first() {
        let tools = vec![
            "definitely-not-installed-interpreter".to_string(),
            "sh".to_string(),
        ];
        let err = check_required_tools(&tools).unwrap_err();
        match err {
            AlchemistError::MissingDependency(tool) => {
                assert_eq!(tool, "definitely-not-installed-interpreter")
            }
            other => panic!("Expected MissingDependency, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_present_tools_resolve() {
        let found = check_required_tools(&["sh".to_string()]).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_scaffold_creates_dirs_and_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.bootstrap.scaffold_dirs = vec![temp.path().join("out"), temp.path().join("docs")];
        let config_path = temp.path().join("alchemist.toml");

        scaffold_workspace(&config, &config_path).unwrap();

        assert!(temp.path().join("out").is_dir());
        assert!(temp.path().join("docs").is_dir());
        assert!(config_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_executable_replaces_old_link() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");

        let first = link_executable(&bin).unwrap();
        let second = link_executable(&bin).unwrap();

        assert_eq!(first, second);
        assert!(fs::symlink_metadata(&second).unwrap().file_type().is_symlink());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_executable_refuses_regular_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(LINK_NAME), "not a link").unwrap();

        assert!(link_executable(temp.path()).is_err());
    }
}
