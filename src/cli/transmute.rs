use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::analyze::{self, AnalyzeArgs};
use super::dashboard::{self, DashboardArgs};
use super::document::{self, DocumentArgs};
use super::optimize::{self, OptimizeArgs};
use super::refactor::{self, RefactorArgs};
use crate::assistant::Runner;
use crate::config::Config;
use crate::display::status;
use crate::error::{AlchemistError, Result};
use crate::renderer::{AnalysisFormat, DocFormat};

/// Files written into the output directory
pub const ANALYSIS_FILE: &str = "analysis.md";
pub const DOCS_SUBDIR: &str = "docs";
pub const REFACTORING_FILE: &str = "refactoring.md";
pub const OPTIMIZATIONS_FILE: &str = "optimizations.md";
pub const DASHBOARD_FILE: &str = "PROJECT_DASHBOARD.md";

#[derive(Debug, Clone, Args)]
pub struct TransmuteArgs {
    /// Path to a source file or project directory
    pub path: PathBuf,

    /// Output directory (default: alchemist_output)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Record a failed step and keep going
fn record(step: &str, result: Result<()>, failures: &mut Vec<String>) {
    if let Err(e) = result {
        warn!("Transmute step '{}' failed: {}", step, e);
        status::failure(&format!("✗ {} failed: {}", step, e));
        failures.push(step.to_string());
    }
}

/// Directory containing `path`, resolved to an absolute path
fn parent_dir(path: &Path) -> Result<PathBuf> {
    let absolute = fs::canonicalize(path)?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(absolute))
}

/// Dashboard for the directory holding a single file
async fn file_dashboard(
    config: &Config,
    runner: &Runner<'_>,
    path: &Path,
    output: PathBuf,
) -> Result<()> {
    let dashboard_args = DashboardArgs {
        path: parent_dir(path)?,
        output: Some(output),
    };
    dashboard::run(config, runner, &dashboard_args).await
}

/// Run every report for `path` into one output directory
pub async fn run(config: &Config, runner: &Runner<'_>, args: &TransmuteArgs) -> Result<()> {
    super::ensure_exists(&args.path)?;
    status::header(&format!(
        "✨ Transmuting '{}' - Running full code alchemy...",
        args.path.display()
    ));

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.transmute_dir.clone());
    fs::create_dir_all(&output_dir)?;

    let mut failures = Vec::new();
    let dashboard_file = output_dir.join(DASHBOARD_FILE);

    if args.path.is_file() {
        let analyze_args = AnalyzeArgs {
            path: args.path.clone(),
            output: Some(output_dir.join(ANALYSIS_FILE)),
            format: AnalysisFormat::Markdown,
        };
        record(
            "analysis",
            analyze::run(config, runner, &analyze_args).await,
            &mut failures,
        );

        let document_args = DocumentArgs {
            path: args.path.clone(),
            output: Some(output_dir.join(DOCS_SUBDIR)),
            format: DocFormat::Markdown,
        };
        record(
            "documentation",
            document::run(config, runner, &document_args).await,
            &mut failures,
        );

        let refactor_args = RefactorArgs {
            path: args.path.clone(),
            apply: false,
            output: Some(output_dir.join(REFACTORING_FILE)),
        };
        record(
            "refactoring",
            refactor::run(runner, &refactor_args).await,
            &mut failures,
        );

        let optimize_args = OptimizeArgs {
            path: args.path.clone(),
            output: Some(output_dir.join(OPTIMIZATIONS_FILE)),
            security: true,
            performance: true,
        };
        record(
            "optimization",
            optimize::run(runner, &optimize_args).await,
            &mut failures,
        );

        record(
            "dashboard",
            file_dashboard(config, runner, &args.path, dashboard_file).await,
            &mut failures,
        );
    } else {
        let dashboard_args = DashboardArgs {
            path: args.path.clone(),
            output: Some(dashboard_file),
        };
        record(
            "dashboard",
            dashboard::run(config, runner, &dashboard_args).await,
            &mut failures,
        );
    }

    if failures.is_empty() {
        status::success(&format!(
            "✨ Transmutation complete! Outputs in '{}'",
            output_dir.display()
        ));
        Ok(())
    } else {
        status::warning(&format!(
            "Transmutation finished with errors. Partial outputs in '{}'",
            output_dir.display()
        ));
        Err(AlchemistError::StepsFailed(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_collects_failures() {
        let mut failures = Vec::new();
        record("analysis", Ok(()), &mut failures);
        record(
            "dashboard",
            Err(AlchemistError::Assistant("boom".to_string())),
            &mut failures,
        );
        assert_eq!(failures, vec!["dashboard"]);
    }

    #[test]
    fn test_parent_dir_is_absolute() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("calc.py");
        fs::write(&file, "x = 1").unwrap();

        let parent = parent_dir(&file).unwrap();
        assert!(parent.is_absolute());
        assert_eq!(parent, fs::canonicalize(temp.path()).unwrap());
    }

    #[tokio::test]
    async fn test_unresolvable_parent_is_a_recorded_step_failure() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let runner = Runner::new(&config.assistant);
        let mut failures = Vec::new();

        let result = file_dashboard(
            &config,
            &runner,
            &temp.path().join("vanished.py"),
            temp.path().join("PROJECT_DASHBOARD.md"),
        )
        .await;
        record("dashboard", result, &mut failures);

        assert_eq!(failures, vec!["dashboard"]);
        assert!(!temp.path().join("PROJECT_DASHBOARD.md").exists());
    }
}
