use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use crate::assistant::Runner;
use crate::config::Config;
use crate::display::status;
use crate::error::Result;
use crate::prompts;
use crate::renderer::{AnalysisFormat, Renderer};

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Path to code directory or file
    pub path: PathBuf,

    /// Output file for analysis results (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = AnalysisFormat::Text)]
    pub format: AnalysisFormat,
}

/// Analyze code quality and structure
pub async fn run(config: &Config, runner: &Runner<'_>, args: &AnalyzeArgs) -> Result<()> {
    super::ensure_exists(&args.path)?;
    status::header(&format!("🔍 Analyzing code at '{}'...", args.path.display()));

    let prompt = prompts::analysis(&args.path, config.limits.max_listed_files)?;
    let reply = runner.query(&prompt).await?;

    let report = Renderer::new(Local::now()).analysis(args.format, &args.path, &reply)?;
    super::emit_report(
        args.output.as_deref(),
        &report,
        "Analysis results",
        matches!(args.format, AnalysisFormat::Markdown),
    )
}
