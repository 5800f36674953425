//! Project scaffold module
//!
//! Pulls file contents out of an assistant reply and writes them below a
//! project root. Fenced code blocks tagged with a file name are preferred;
//! README, .gitignore and .env.example sections are recognized as a fallback.

use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

use crate::error::{AlchemistError, Result};

/// A file proposed by the assistant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub path: PathBuf,
    pub content: String,
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```([^\n]*)\n(.*?)```").expect("valid regex"))
}

/// Extract the files described in `response`
pub fn extract_files(response: &str) -> Vec<ScaffoldFile> {
    let mut files = Vec::new();

    for caps in fence_regex().captures_iter(response) {
        let Some(name) = file_name_from_info(&caps[1]) else {
            continue;
        };
        push_file(&mut files, name, caps[2].trim());
    }

    if files.is_empty() {
        if let Some(readme) = readme_section(response) {
            push_file(&mut files, "README.md", &readme);
        }
        if let Some(gitignore) = labeled_block(response, ".gitignore:") {
            push_file(&mut files, ".gitignore", &gitignore);
        }
        if let Some(env) = labeled_block(response, ".env.example:") {
            push_file(&mut files, ".env.example", &env);
        }
    }

    files
}

fn push_file(files: &mut Vec<ScaffoldFile>, name: &str, content: &str) {
    let Some(path) = safe_relative_path(name) else {
        warn!("Ignoring unsafe file name from assistant: {}", name);
        return;
    };

    // Later blocks for the same file win
    match files.iter_mut().find(|f| f.path == path) {
        Some(existing) => existing.content = content.to_string(),
        None => files.push(ScaffoldFile {
            path,
            content: content.to_string(),
        }),
    }
}

/// `file: NAME` in the info string, else its last token containing a dot
fn file_name_from_info(info: &str) -> Option<&str> {
    if let Some(idx) = info.find("file:") {
        return info[idx + "file:".len()..].split_whitespace().next();
    }

    info.split_whitespace().rev().find(|token| token.contains('.'))
}

/// Relative path with only normal components
fn safe_relative_path(name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    let mut clean = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// Body under a `# ...README...` heading, up to the next `# ` heading
fn readme_section(response: &str) -> Option<String> {
    let mut lines = response.lines();
    lines.find(|line| line.starts_with("# ") && line.contains("README"))?;

    let body: Vec<&str> = lines.take_while(|line| !line.starts_with("# ")).collect();
    let body = body.join("\n").trim().to_string();
    (!body.is_empty()).then_some(body)
}

/// Lines after a line ending in `label`, up to the first blank line
fn labeled_block(response: &str, label: &str) -> Option<String> {
    let mut lines = response.lines();
    lines.find(|line| line.trim_end().ends_with(label))?;

    let body: Vec<&str> = lines.take_while(|line| !line.trim().is_empty()).collect();
    let body = body.join("\n").trim().to_string();
    (!body.is_empty()).then_some(body)
}

/// Write `files` below `root`, creating parent directories
pub fn write_files(root: &Path, files: &[ScaffoldFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let target = root.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AlchemistError::Scaffold(format!(
                    "cannot create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        fs::write(&target, &file.content)?;
        written.push(target);
    }

    Ok(written)
}
