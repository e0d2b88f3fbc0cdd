//! CSV report writers.
//!
//! Field layout is a consumer contract: the companion metrics script and
//! downstream spreadsheets read these files unmodified. Summaries are
//! normalized (quotes to apostrophes, newlines to spaces) before quoting
//! so a row is always a single physical line.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::run::AnalysisRow;
use crate::batch::scan::DatasetEntry;
use crate::error::BatchError;

pub const DATASET_HEADER: &str = "APK_PATH,FILENAME,GROUND_TRUTH_LABEL,FILE_SIZE_KB";

pub const RESULTS_HEADER: &str = "APK_PATH,FILENAME,GROUND_TRUTH_LABEL,PREDICTED_LABEL,\
AI_RISK_LEVEL,DANGEROUS_PERMISSIONS,ANALYSIS_SUMMARY";

pub fn write_dataset_csv(path: &Path, entries: &[DatasetEntry]) -> Result<(), BatchError> {
    let mut out = String::from(DATASET_HEADER);
    out.push('\n');
    for entry in entries {
        out.push_str(&format!(
            "{},{},{},{}\n",
            entry.path.display(),
            entry.file_name,
            entry.ground_truth,
            entry.size_kb
        ));
    }
    write(path, &out)
}

/// Writes one row per entry that produced a result; failed entries are
/// simply absent.
pub fn write_results_csv(
    path: &Path,
    entries: &[DatasetEntry],
    results: &HashMap<PathBuf, AnalysisRow>,
) -> Result<(), BatchError> {
    let mut out = String::from(RESULTS_HEADER);
    out.push('\n');
    for entry in entries {
        let Some(row) = results.get(&entry.path) else {
            continue;
        };
        out.push_str(&format!(
            "{},{},{},{},{},\"{}\",\"{}\"\n",
            entry.path.display(),
            entry.file_name,
            entry.ground_truth,
            row.predicted,
            row.risk_label,
            row.dangerous_permissions.join(";"),
            normalize_summary(&row.summary),
        ));
    }
    write(path, &out)
}

fn write(path: &Path, contents: &str) -> Result<(), BatchError> {
    fs::write(path, contents).map_err(|source| BatchError::Report {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn normalize_summary(summary: &str) -> String {
    summary.replace('"', "'").replace('\n', " ")
}
