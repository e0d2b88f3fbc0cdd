//! Dataset discovery.
//!
//! The dataset root must hold exactly two category directories, `safe`
//! and `malware` (case-insensitive), whose names become the ground-truth
//! labels. Anything else is a structure error with a remediation message
//! rather than a silent no-op.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::BatchError;

/// Artifact extension accepted during scanning, matched case-insensitively.
pub const ARTIFACT_EXTENSION: &str = "apk";

const CATEGORY_DIRS: &[&str] = &["safe", "malware"];

/// One labeled artifact discovered in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetEntry {
    pub path: PathBuf,

    pub file_name: String,

    /// Uppercased name of the containing category directory.
    pub ground_truth: String,

    pub size_kb: u64,
}

/// Scans a dataset root into labeled entries.
///
/// Entries are ordered by (category directory, file name) so repeated
/// scans of the same tree produce identical reports.
pub fn scan_dataset(root: &Path) -> Result<Vec<DatasetEntry>, BatchError> {
    let structure_err = |reason: String| BatchError::DatasetStructure {
        root: root.to_path_buf(),
        reason,
    };

    if !root.is_dir() {
        return Err(structure_err("not a directory".into()));
    }

    let mut category_dirs: Vec<PathBuf> = fs::read_dir(root)
        .map_err(|err| structure_err(format!("unreadable: {err}")))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    category_dirs.sort();

    if category_dirs.is_empty() {
        return Err(structure_err("no category directories found".into()));
    }
    if category_dirs.len() != CATEGORY_DIRS.len() {
        return Err(structure_err(format!(
            "found {} category directories, expected {}",
            category_dirs.len(),
            CATEGORY_DIRS.len()
        )));
    }
    for dir in &category_dirs {
        let name = dir_name(dir);
        if !CATEGORY_DIRS.iter().any(|c| name.eq_ignore_ascii_case(c)) {
            return Err(structure_err(format!("unexpected category directory `{name}`")));
        }
    }

    let mut entries = Vec::new();
    for dir in &category_dirs {
        let ground_truth = dir_name(dir).to_uppercase();

        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|err| structure_err(format!("unreadable category {}: {err}", dir.display())))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION))
            })
            .collect();
        files.sort();

        for path in files {
            let size_kb = fs::metadata(&path).map(|m| m.len() / 1024).unwrap_or(0);
            entries.push(DatasetEntry {
                file_name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                ground_truth: ground_truth.clone(),
                size_kb,
                path,
            });
        }
    }

    if entries.is_empty() {
        return Err(structure_err(
            "no .apk artifacts found in the category directories".into(),
        ));
    }

    Ok(entries)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
