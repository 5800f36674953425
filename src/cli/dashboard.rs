use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::assistant::Runner;
use crate::config::Config;
use crate::display::status;
use crate::error::Result;
use crate::{prompts, stats};

#[derive(Debug, Clone, Args)]
pub struct DashboardArgs {
    /// Path to project directory
    pub path: PathBuf,

    /// Output markdown file (default: PROJECT_DASHBOARD.md)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Generate a project dashboard from directory statistics
pub async fn run(config: &Config, runner: &Runner<'_>, args: &DashboardArgs) -> Result<()> {
    super::ensure_exists(&args.path)?;
    status::header(&format!(
        "📊 Generating project dashboard for '{}'...",
        args.path.display()
    ));

    let stats = stats::gather(&args.path)?;
    debug!(
        files = stats.file_count,
        directories = stats.directory_count,
        lines = stats.total_lines,
        "Gathered project stats"
    );

    let reply = runner.query(&prompts::dashboard(&args.path, &stats)?).await?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.dashboard_file.clone());
    super::write_file(&output, &reply)?;
    status::success(&format!("Dashboard saved to '{}'", output.display()));

    Ok(())
}
