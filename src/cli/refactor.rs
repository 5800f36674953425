use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use crate::assistant::Runner;
use crate::display::status;
use crate::error::Result;
use crate::prompts;
use crate::renderer::Renderer;

#[derive(Debug, Clone, Args)]
pub struct RefactorArgs {
    /// Path to the source file
    pub path: PathBuf,

    /// Apply suggested refactorings (not supported yet)
    #[arg(long)]
    pub apply: bool,

    /// Output file for refactoring suggestions (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Ask the assistant for refactoring suggestions on one file
pub async fn run(runner: &Runner<'_>, args: &RefactorArgs) -> Result<()> {
    super::ensure_exists(&args.path)?;
    status::header(&format!(
        "🔄 Analyzing '{}' for refactoring opportunities...",
        args.path.display()
    ));
    super::ensure_file(&args.path, "Refactoring")?;

    let content = prompts::read_source(&args.path)?;
    let reply = runner
        .query(&prompts::refactoring(&args.path, &content))
        .await?;

    let report = Renderer::new(Local::now()).framed("REFACTORING SUGGESTIONS", &args.path, &reply);
    super::emit_report(args.output.as_deref(), &report, "Suggestions", false)?;

    if args.apply {
        status::warning("Warning: Auto-apply not implemented yet. Review suggestions manually.");
    }

    Ok(())
}
