use clap::{Args, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assistant::Runner;
use crate::display::status;
use crate::error::Result;
use crate::{prompts, scaffold};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectType {
    Python,
    Node,
    Java,
    General,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Python => "python",
            ProjectType::Node => "node",
            ProjectType::Java => "java",
            ProjectType::General => "general",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SetupArgs {
    /// Path to project directory (created if missing)
    pub path: PathBuf,

    /// Project type
    #[arg(long = "type", value_enum, default_value_t = ProjectType::General)]
    pub project_type: ProjectType,

    /// Project name (default: directory name)
    #[arg(long)]
    pub name: Option<String>,
}

/// Project name from the last component of the absolute directory
fn default_name(path: &Path) -> Result<String> {
    let absolute = fs::canonicalize(path)?;
    Ok(absolute
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string()))
}

/// Create a project skeleton from the assistant's proposal
pub async fn run(runner: &Runner<'_>, args: &SetupArgs) -> Result<()> {
    status::header(&format!(
        "🏗️ Setting up project structure for '{}'...",
        args.path.display()
    ));

    fs::create_dir_all(&args.path)?;
    let name = match &args.name {
        Some(name) => name.clone(),
        None => default_name(&args.path)?,
    };

    let reply = runner
        .query(&prompts::project_setup(args.project_type.as_str(), &name))
        .await?;

    let files = scaffold::extract_files(&reply);
    if files.is_empty() {
        status::warning("The assistant response contained no files to create.");
    }

    for created in scaffold::write_files(&args.path, &files)? {
        status::success(&format!("Created: {}", created.display()));
    }

    status::success("Project setup completed!");
    Ok(())
}
