use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::analyze::{self, AnalyzeArgs};
use super::dashboard::{self, DashboardArgs};
use super::document::{self, DocumentArgs};
use super::optimize::{self, OptimizeArgs};
use super::refactor::{self, RefactorArgs};
use super::transmute::{self, TransmuteArgs};
use crate::assistant::Runner;
use crate::config::Config;
use crate::display::{self, status};
use crate::error::{AlchemistError, Result};
use crate::renderer::{AnalysisFormat, DocFormat};

const SAMPLE_DIR: &str = "sample_code";
const SAMPLE_NAME: &str = "messy_calculator.py";
const ANALYSIS_REPORT: &str = "analysis_report.md";
const DOCS_DIR: &str = "docs";
const REFACTOR_REPORT: &str = "refactor_suggestions.md";
const SECURITY_REPORT: &str = "security_optimizations.md";
const DASHBOARD_FILE: &str = "PROJECT_DASHBOARD.md";
const TRANSMUTE_DIR: &str = "alchemist_output";
const BACKUP_SUFFIX: &str = ".demo-backup";

fn sample_file() -> PathBuf {
    Path::new(SAMPLE_DIR).join(SAMPLE_NAME)
}

fn docs_page(dir: &Path) -> PathBuf {
    dir.join(format!("{}.{}", SAMPLE_NAME, DocFormat::Markdown.extension()))
}

/// Directories the demo may create, parents before children
pub fn directories() -> Vec<PathBuf> {
    vec![
        PathBuf::from(SAMPLE_DIR),
        PathBuf::from(DOCS_DIR),
        PathBuf::from(TRANSMUTE_DIR),
        Path::new(TRANSMUTE_DIR).join(transmute::DOCS_SUBDIR),
    ]
}

/// Every file the demo writes, relative to the working directory
pub fn files() -> Vec<PathBuf> {
    let transmute_dir = Path::new(TRANSMUTE_DIR);
    vec![
        sample_file(),
        PathBuf::from(ANALYSIS_REPORT),
        docs_page(Path::new(DOCS_DIR)),
        PathBuf::from(REFACTOR_REPORT),
        PathBuf::from(SECURITY_REPORT),
        PathBuf::from(DASHBOARD_FILE),
        transmute_dir.join(transmute::ANALYSIS_FILE),
        docs_page(&transmute_dir.join(transmute::DOCS_SUBDIR)),
        transmute_dir.join(transmute::REFACTORING_FILE),
        transmute_dir.join(transmute::OPTIMIZATIONS_FILE),
        transmute_dir.join(transmute::DASHBOARD_FILE),
    ]
}

const SAMPLE_CODE: &str = r#"import os,sys
import json
def calc(a,b,op):
    if op=="add":
        return a+b
    elif op=="sub":
        return a-b
    elif op=="mul":
        return a*b
    elif op=="div":
        return a/b
    else:
        print("bad op")
        return None
x=[]
def do_stuff(data):
    global x
    for i in range(len(data)):
        if data[i]>0:
            x.append(calc(data[i],2,"mul"))
        else:
            x.append(calc(data[i],2,"div"))
    return x
def load(path):
    f=open(path)
    d=json.loads(f.read())
    return d
def run_cmd(cmd):
    os.system("echo "+cmd)
password="admin123"
if __name__=="__main__":
    data=[1,-2,3,0,5]
    print(do_stuff(data))
    run_cmd(sys.argv[1] if len(sys.argv)>1 else "hello")
"#;

#[derive(Debug, Clone, Args)]
pub struct DemoArgs {
    /// Keep generated files instead of cleaning up
    #[arg(long)]
    pub keep: bool,
}

/// A file the demo writes, and where a pre-existing copy was moved aside
struct Generated {
    path: PathBuf,
    backup: Option<PathBuf>,
}

/// Undoes the demo on drop: generated files are removed, moved-aside
/// originals are put back, and directories the demo created are deleted.
pub struct Cleanup {
    root: PathBuf,
    created_dirs: Vec<PathBuf>,
    files: Vec<Generated>,
    enabled: bool,
}

impl Cleanup {
    /// Snapshot `root` before anything is written. Existing files at the
    /// generated paths are renamed aside so the demo never overwrites them.
    pub fn new(root: &Path, dirs: &[PathBuf], files: &[PathBuf], enabled: bool) -> Result<Self> {
        let mut cleanup = Self {
            root: root.to_path_buf(),
            created_dirs: dirs
                .iter()
                .map(|dir| root.join(dir))
                .filter(|dir| fs::symlink_metadata(dir).is_err())
                .collect(),
            files: Vec::with_capacity(files.len()),
            enabled,
        };

        for file in files {
            let path = root.join(file);
            let backup = if fs::symlink_metadata(&path).is_ok() {
                let backup = backup_path(&path);
                fs::rename(&path, &backup)?;
                status::warning(&format!(
                    "Moved existing '{}' aside to '{}'",
                    path.display(),
                    backup.display()
                ));
                Some(backup)
            } else {
                None
            };
            cleanup.files.push(Generated { path, backup });
        }

        Ok(cleanup)
    }

    /// Remove generated files and restore originals; safe to call more than once
    pub fn run(&mut self) {
        if !self.enabled {
            for file in self.files.drain(..) {
                if let Some(backup) = file.backup {
                    status::warning(&format!(
                        "Original '{}' kept at '{}'",
                        file.path.display(),
                        backup.display()
                    ));
                }
            }
            return;
        }

        for file in self.files.drain(..) {
            remove_path(&file.path);
            if let Some(backup) = file.backup {
                match fs::rename(&backup, &file.path) {
                    Ok(()) => debug!("Restored {}", file.path.display()),
                    Err(e) => warn!(
                        "Could not restore {} from {}: {}",
                        file.path.display(),
                        backup.display(),
                        e
                    ),
                }
            }
        }

        for dir in self.created_dirs.drain(..).rev() {
            remove_path(&dir);
        }
        debug!("Demo cleanup finished in {}", self.root.display());
    }
}

impl Drop for Cleanup {
    fn drop(&mut self) {
        self.run();
    }
}

/// First unused `<path>.demo-backup[.N]` name
fn backup_path(path: &Path) -> PathBuf {
    let base = format!("{}{}", path.display(), BACKUP_SUFFIX);
    let mut candidate = PathBuf::from(&base);
    let mut n = 1;
    while fs::symlink_metadata(&candidate).is_ok() {
        candidate = PathBuf::from(format!("{}.{}", base, n));
        n += 1;
    }
    candidate
}

fn remove_path(path: &Path) {
    let result = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(_) => return,
    };
    match result {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) => warn!("Could not remove {}: {}", path.display(), e),
    }
}

/// Print what a step produced, or warn when its output is missing
fn show_output(step: &str, result: Result<()>, expected: &Path) {
    if let Err(e) = result {
        status::failure(&format!("{} reported an error: {}", step, e));
    }

    if expected.is_dir() {
        let mut names: Vec<String> = fs::read_dir(expected)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        status::success(&format!("Generated in '{}':", expected.display()));
        for name in names {
            println!("  - {}", name);
        }
        return;
    }

    match fs::read_to_string(expected) {
        Ok(content) => display::print_markdown(&content),
        Err(_) => status::failure(&format!(
            "{} not found: '{}' was not generated",
            step,
            expected.display()
        )),
    }
}

/// Write the sample and walk through every subcommand
async fn sequence(config: &Config, runner: &Runner<'_>) -> Result<()> {
    status::banner("✨ Code Alchemist Demo");

    let sample = sample_file();
    fs::create_dir_all(SAMPLE_DIR)?;
    fs::write(&sample, SAMPLE_CODE)?;
    status::success(&format!("Created sample file '{}'", sample.display()));

    status::banner("1. Analyzing code");
    let result = analyze::run(
        config,
        runner,
        &AnalyzeArgs {
            path: sample.clone(),
            output: Some(PathBuf::from(ANALYSIS_REPORT)),
            format: AnalysisFormat::Markdown,
        },
    )
    .await;
    show_output("Analysis report", result, Path::new(ANALYSIS_REPORT));

    status::banner("2. Generating documentation");
    let result = document::run(
        config,
        runner,
        &DocumentArgs {
            path: sample.clone(),
            output: Some(PathBuf::from(DOCS_DIR)),
            format: DocFormat::Markdown,
        },
    )
    .await;
    show_output("Documentation", result, &docs_page(Path::new(DOCS_DIR)));

    status::banner("3. Suggesting refactorings");
    let result = refactor::run(
        runner,
        &RefactorArgs {
            path: sample.clone(),
            apply: false,
            output: Some(PathBuf::from(REFACTOR_REPORT)),
        },
    )
    .await;
    show_output("Refactoring suggestions", result, Path::new(REFACTOR_REPORT));

    status::banner("4. Security optimizations");
    let result = optimize::run(
        runner,
        &OptimizeArgs {
            path: sample.clone(),
            output: Some(PathBuf::from(SECURITY_REPORT)),
            security: true,
            performance: false,
        },
    )
    .await;
    show_output("Security optimizations", result, Path::new(SECURITY_REPORT));

    status::banner("5. Project dashboard");
    let result = dashboard::run(
        config,
        runner,
        &DashboardArgs {
            path: PathBuf::from(SAMPLE_DIR),
            output: Some(PathBuf::from(DASHBOARD_FILE)),
        },
    )
    .await;
    show_output("Project dashboard", result, Path::new(DASHBOARD_FILE));

    status::banner("6. Full transmutation");
    let result = transmute::run(
        config,
        runner,
        &TransmuteArgs {
            path: sample,
            output_dir: Some(PathBuf::from(TRANSMUTE_DIR)),
        },
    )
    .await;
    show_output("Transmutation output", result, Path::new(TRANSMUTE_DIR));

    status::banner("Demo complete");
    Ok(())
}

/// Run the demo in the working directory; artifacts are removed on every exit path
pub async fn run(config: &Config, runner: &Runner<'_>, args: &DemoArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut cleanup = Cleanup::new(&cwd, &directories(), &files(), !args.keep)?;

    let outcome = tokio::select! {
        result = sequence(config, runner) => result,
        _ = tokio::signal::ctrl_c() => {
            status::warning("Interrupted, cleaning up...");
            Err(AlchemistError::Interrupted)
        }
    };

    cleanup.run();
    if args.keep {
        status::progress("Keeping generated files (--keep).");
    } else {
        status::progress("🧹 Cleaned up generated files.");
    }

    outcome
}
