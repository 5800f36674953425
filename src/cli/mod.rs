//! Command-line interface module
//!
//! One file per subcommand:
//! - analyze, document, refactor, optimize, dashboard: assistant-backed reports
//! - setup: scaffold a project from the assistant's proposal
//! - transmute: every report for a path in one pass
//! - bootstrap: environment checks, symlink, login, working scaffold
//! - demo: guided run over a sample file, cleaned up afterwards
//! - config init: write a default alchemist.toml

pub mod analyze;
pub mod bootstrap;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod document;
pub mod optimize;
pub mod refactor;
pub mod setup;
pub mod transmute;

use std::fs;
use std::path::Path;

use crate::display::{self, status};
use crate::error::{AlchemistError, Result};

/// Fail with `PathNotFound` unless `path` exists
pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AlchemistError::PathNotFound(path.to_path_buf()))
    }
}

/// Fail with `Unsupported` unless `path` is a regular file
pub(crate) fn ensure_file(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AlchemistError::Unsupported(format!(
            "{} currently supports single files only.",
            what
        )))
    }
}

/// Write a report to `output`, or print it when no file was requested.
/// Only markdown reports go through the terminal skin; everything else is printed verbatim.
pub(crate) fn emit_report(
    output: Option<&Path>,
    report: &str,
    label: &str,
    markdown: bool,
) -> Result<()> {
    match output {
        Some(path) => {
            write_file(path, report)?;
            status::success(&format!("{} saved to '{}'", label, path.display()));
        }
        None if markdown => display::print_markdown(report),
        None => println!("{}", report),
    }
    Ok(())
}

/// Write `content` to `path`, creating missing parent directories
pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}
