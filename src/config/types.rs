use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Code Alchemist configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External assistant invocation
    pub assistant: Assistant,

    /// Default output locations
    pub output: Output,

    /// Prompt size limits
    pub limits: Limits,

    /// Environment checks and scaffold for `bootstrap`
    pub bootstrap: Bootstrap,
}

/// How to launch the external assistant CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Assistant {
    /// Program name or path, resolved through PATH
    pub program: String,

    /// Arguments for a chat query; the prompt is fed on stdin
    pub args: Vec<String>,

    /// Arguments that print the assistant version
    pub version_args: Vec<String>,

    /// Arguments that start the assistant's own login flow
    pub login_args: Vec<String>,

    /// Seconds before a query is killed
    pub timeout_secs: u64,
}

/// Default output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Output directory for `transmute`
    pub transmute_dir: PathBuf,

    /// Output directory for `document`
    pub docs_dir: PathBuf,

    /// Output file for `dashboard`
    pub dashboard_file: PathBuf,
}

/// Limits applied when building prompts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum file names listed in a directory analysis prompt
    pub max_listed_files: usize,
}

/// Bootstrap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Bootstrap {
    /// Binaries that must be on PATH (interpreter, package manager)
    pub required_tools: Vec<String>,

    /// Directories created as the working scaffold
    pub scaffold_dirs: Vec<PathBuf>,
}

impl Default for Assistant {
    fn default() -> Self {
        Self {
            program: "q".to_string(),
            args: vec!["chat".to_string(), "--trust-all-tools".to_string()],
            version_args: vec!["--version".to_string()],
            login_args: vec!["login".to_string()],
            timeout_secs: 300,
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            transmute_dir: PathBuf::from("alchemist_output"),
            docs_dir: PathBuf::from("docs"),
            dashboard_file: PathBuf::from("PROJECT_DASHBOARD.md"),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_listed_files: 50,
        }
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            required_tools: vec!["python3".to_string(), "pip3".to_string()],
            scaffold_dirs: vec![PathBuf::from("alchemist_output"), PathBuf::from("docs")],
        }
    }
}
