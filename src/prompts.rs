//! Prompt construction for assistant queries

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::Result;
use crate::stats::ProjectStats;

/// Read a source file, replacing invalid UTF-8
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn fenced(path: &Path, content: &str) -> String {
    format!(
        "Here's the content of {}:\n\n```\n{}\n```\n\n",
        path.display(),
        content
    )
}

/// Prompt for `analyze`, embedding a file or listing a directory
pub fn analysis(path: &Path, max_listed_files: usize) -> Result<String> {
    let mut prompt = String::new();

    if path.is_file() {
        prompt.push_str(&format!(
            "I'm going to share a file with you for analysis. Path: {}\n\n",
            path.display()
        ));
        prompt.push_str(&fenced(path, &read_source(path)?));
    } else {
        prompt.push_str(&format!(
            "I'm going to share a directory with you for analysis. Path: {}\n\n",
            path.display()
        ));
        prompt.push_str(&format!(
            "Directory analysis for {}. File list:\n\n",
            path.display()
        ));

        let files = list_files(path)?;
        let listed: Vec<&str> = files.iter().take(max_listed_files).map(String::as_str).collect();
        prompt.push_str(&listed.join("\n"));
        if files.len() > max_listed_files {
            prompt.push_str(&format!(
                "\n... and {} more files.",
                files.len() - max_listed_files
            ));
        }
    }

    prompt.push_str("\n\nProvide detailed assessment of code quality, structure, and organization.");
    Ok(prompt)
}

/// Relative paths of every file below `root`, in sorted walk order
fn list_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            files.push(relative.display().to_string());
        }
    }
    Ok(files)
}

pub fn documentation(path: &Path, content: &str) -> String {
    format!(
        "Generate documentation for {}:\n\n```\n{}\n```",
        path.display(),
        content
    )
}

pub fn refactoring(path: &Path, content: &str) -> String {
    format!(
        "Suggest refactoring for {}:\n\n```\n{}\n```",
        path.display(),
        content
    )
}

pub fn optimization(path: &Path, focus: &str, content: &str) -> String {
    format!(
        "Suggest {} optimizations for {}:\n\n```\n{}\n```",
        focus,
        path.display(),
        content
    )
}

pub fn dashboard(path: &Path, stats: &ProjectStats) -> Result<String> {
    Ok(format!(
        "Generate project dashboard for {} with stats: {}",
        path.display(),
        serde_json::to_string(stats)?
    ))
}

/// Prompt for `setup`; asks for fenced blocks tagged with file names
pub fn project_setup(project_type: &str, name: &str) -> String {
    format!(
        "Setup {} project '{}' structure with config files. \
         Put each file in its own fenced code block whose info string is `file: <relative path>`.",
        project_type, name
    )
}
