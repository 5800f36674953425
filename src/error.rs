use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Code Alchemist error types
#[derive(Error, Debug)]
pub enum AlchemistError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path '{}' does not exist.", .0.display())]
    PathNotFound(PathBuf),

    #[error("{0}")]
    Unsupported(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("Assistant did not respond within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Scaffold error: {0}")]
    Scaffold(String),

    #[error("{} step(s) failed: {}", .0.len(), .0.join(", "))]
    StepsFailed(Vec<String>),

    #[error("Interrupted")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for Code Alchemist operations
pub type Result<T> = std::result::Result<T, AlchemistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = AlchemistError::Config("test error".to_string());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_error_display_path_not_found() {
        let err = AlchemistError::PathNotFound(PathBuf::from("missing/file.py"));
        assert_eq!(err.to_string(), "Path 'missing/file.py' does not exist.");
    }

    #[test]
    fn test_error_display_timeout() {
        let err = AlchemistError::Timeout(Duration::from_secs(300));
        assert_eq!(err.to_string(), "Assistant did not respond within 300s");
    }

    #[test]
    fn test_error_display_steps_failed() {
        let err = AlchemistError::StepsFailed(vec!["analysis".to_string(), "dashboard".to_string()]);
        assert_eq!(err.to_string(), "2 step(s) failed: analysis, dashboard");
    }

    #[test]
    fn test_error_display_unsupported_is_bare() {
        let err = AlchemistError::Unsupported(
            "Refactoring currently supports single files only.".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "Refactoring currently supports single files only."
        );
    }
}
