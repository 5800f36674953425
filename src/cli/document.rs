use chrono::Local;
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::assistant::Runner;
use crate::config::Config;
use crate::display::status;
use crate::error::Result;
use crate::prompts;
use crate::renderer::{DocFormat, Renderer};

#[derive(Debug, Clone, Args)]
pub struct DocumentArgs {
    /// Path to the source file
    pub path: PathBuf,

    /// Output directory for documentation (default: docs)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Documentation format
    #[arg(long, value_enum, default_value_t = DocFormat::Markdown)]
    pub format: DocFormat,
}

/// Generate documentation for a single file
pub async fn run(config: &Config, runner: &Runner<'_>, args: &DocumentArgs) -> Result<()> {
    super::ensure_exists(&args.path)?;
    status::header(&format!(
        "📝 Generating documentation for '{}'...",
        args.path.display()
    ));
    super::ensure_file(&args.path, "Documentation generation")?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.docs_dir.clone());
    fs::create_dir_all(&output_dir)?;

    let content = prompts::read_source(&args.path)?;
    let reply = runner
        .query(&prompts::documentation(&args.path, &content))
        .await?;

    let name = args
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let page = Renderer::new(Local::now()).documentation(args.format, &name, &reply);

    let output_file = output_dir.join(format!("{}.{}", name, args.format.extension()));
    fs::write(&output_file, page)?;
    status::success(&format!(
        "Documentation saved to '{}'",
        output_file.display()
    ));

    Ok(())
}
