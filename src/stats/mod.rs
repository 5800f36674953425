//! Project statistics module
//!
//! Walks a project directory and summarizes file counts, extensions, line
//! totals and the largest file. The summary is sent to the assistant when
//! building a dashboard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::Result;

/// Extensions always treated as text
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "py", "js", "java", "c", "cpp", "h", "hpp", "html", "css", "md", "json", "xml", "yaml",
    "yml", "ini", "cfg", "conf", "sh", "bat", "ps1", "go", "rb", "rs", "ts", "php", "swift",
];

/// Bytes sampled when sniffing a file with an unknown extension
const SNIFF_BYTES: u64 = 1024;

/// Key used for files without an extension
const NO_EXTENSION: &str = "no_extension";

/// Summary of a project directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub project_name: String,
    pub file_count: usize,
    pub directory_count: usize,
    pub file_types: BTreeMap<String, usize>,
    pub total_lines: usize,
    pub largest_file: LargestFile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargestFile {
    pub name: String,
    pub size: u64,
}

/// Gather statistics for everything below `root`
pub fn gather(root: &Path) -> Result<ProjectStats> {
    let absolute = fs::canonicalize(root)?;
    let mut stats = ProjectStats {
        project_name: absolute
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        ..ProjectStats::default()
    };

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            stats.directory_count += 1;
            continue;
        }

        let path = entry.path();
        stats.file_count += 1;
        *stats.file_types.entry(extension_key(path)).or_insert(0) += 1;

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!("Could not stat file {}: {}", path.display(), e);
                continue;
            }
        };
        if size > stats.largest_file.size {
            stats.largest_file = LargestFile {
                name: path.display().to_string(),
                size,
            };
        }

        if is_text_file(path) {
            match fs::read(path) {
                Ok(bytes) => stats.total_lines += String::from_utf8_lossy(&bytes).lines().count(),
                Err(e) => warn!("Could not read file {}: {}", path.display(), e),
            }
        }
    }

    Ok(stats)
}

/// Lower-cased extension, or `no_extension`
fn extension_key(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| NO_EXTENSION.to_string())
}

/// Known text extension, or more than 90% ASCII in the first kilobyte
pub fn is_text_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            return true;
        }
    }

    let mut sample = Vec::new();
    let read = File::open(path).and_then(|f| f.take(SNIFF_BYTES).read_to_end(&mut sample));
    if read.is_err() || sample.is_empty() {
        return false;
    }

    let text = String::from_utf8_lossy(&sample);
    let total = text.chars().count();
    let ascii = text.chars().filter(char::is_ascii).count();
    ascii * 10 > total * 9
}
