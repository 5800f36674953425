use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use crate::assistant::Runner;
use crate::display::status;
use crate::error::Result;
use crate::prompts;
use crate::renderer::Renderer;

#[derive(Debug, Clone, Args)]
pub struct OptimizeArgs {
    /// Path to the source file
    pub path: PathBuf,

    /// Output file for optimization suggestions (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Focus on security improvements
    #[arg(long)]
    pub security: bool,

    /// Focus on performance improvements
    #[arg(long)]
    pub performance: bool,
}

/// Human-readable focus; no flag means both
pub fn focus_label(security: bool, performance: bool) -> String {
    let mut focus = Vec::new();
    if security {
        focus.push("security");
    }
    if performance {
        focus.push("performance");
    }
    if focus.is_empty() {
        focus = vec!["security", "performance"];
    }
    focus.join(" and ")
}

/// Ask the assistant for security and/or performance improvements
pub async fn run(runner: &Runner<'_>, args: &OptimizeArgs) -> Result<()> {
    super::ensure_exists(&args.path)?;
    status::header(&format!(
        "⚡ Analyzing '{}' for optimization opportunities...",
        args.path.display()
    ));
    super::ensure_file(&args.path, "Optimization")?;

    let focus = focus_label(args.security, args.performance);
    let content = prompts::read_source(&args.path)?;
    let reply = runner
        .query(&prompts::optimization(&args.path, &focus, &content))
        .await?;

    let title = format!("{} OPTIMIZATIONS", focus.to_uppercase());
    let report = Renderer::new(Local::now()).framed(&title, &args.path, &reply);
    super::emit_report(args.output.as_deref(), &report, "Suggestions", false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_label() {
        assert_eq!(focus_label(true, false), "security");
        assert_eq!(focus_label(false, true), "performance");
        assert_eq!(focus_label(true, true), "security and performance");
        assert_eq!(focus_label(false, false), "security and performance");
    }
}
