//! Batch execution and reporting.
//!
//! Entries are processed in fixed-size batches to bound outbound pressure
//! on the model endpoint: every entry inside a batch runs concurrently
//! and the whole batch completes before the next begins. There is no
//! cross-batch parallelism and no work stealing.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::batch::scan::{self, DatasetEntry};
use crate::batch::{csv, metrics, risk_text};
use crate::error::{BatchError, ExtractError};
use crate::mismatch;
use crate::pipeline::Pipeline;
use crate::risk::RiskTier;

/// Entries analyzed concurrently per batch.
pub const BATCH_SIZE: usize = 3;

/// One batch result row.
#[derive(Debug, Clone)]
pub struct AnalysisRow {
    /// `SAFE` or `MALWARE`; a pure function of the re-parsed risk label.
    pub predicted: String,

    /// Risk label re-derived from the narrative text.
    pub risk_label: String,

    /// Declared permissions matching the dangerous table.
    pub dangerous_permissions: Vec<String>,

    /// The verdict narrative, verbatim.
    pub summary: String,
}

pub struct BatchRunner {
    pipeline: Pipeline,
}

impl BatchRunner {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Runs the full evaluation: scan, analyze, report.
    ///
    /// Reports are only written once at least one entry succeeded, so a
    /// failed run leaves no misleading files behind.
    pub async fn run(&self, dataset_root: &Path, output_dir: &Path) -> Result<String, BatchError> {
        info!(root = %dataset_root.display(), "scanning dataset");
        let entries = scan::scan_dataset(dataset_root)?;
        info!(count = entries.len(), "dataset scan complete");

        let results = self.analyze_batches(&entries).await;
        if results.is_empty() {
            return Err(BatchError::NoResults);
        }

        fs::create_dir_all(output_dir).map_err(|source| BatchError::Report {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let dataset_file = output_dir.join(format!("dataset_info_{stamp}.csv"));
        let results_file = output_dir.join(format!("analysis_results_{stamp}.csv"));
        let script_file = output_dir.join(format!("calculate_metrics_{stamp}.py"));

        csv::write_dataset_csv(&dataset_file, &entries)?;
        csv::write_results_csv(&results_file, &entries, &results)?;
        fs::write(
            &script_file,
            metrics::metrics_script(&dataset_file, &results_file, output_dir),
        )
        .map_err(|source| BatchError::Report {
            path: script_file.clone(),
            source,
        })?;

        info!(results = results.len(), "reports written");
        Ok(format!(
            "Batch analysis complete!\n\
             Analyzed: {}/{} artifacts\n\
             Dataset: {}\n\
             Results: {}",
            results.len(),
            entries.len(),
            dataset_file.display(),
            results_file.display(),
        ))
    }

    async fn analyze_batches(&self, entries: &[DatasetEntry]) -> HashMap<PathBuf, AnalysisRow> {
        let mut results = HashMap::new();
        let total = entries.len();
        let mut processed = 0usize;

        for batch in entries.chunks(BATCH_SIZE) {
            let outcomes =
                futures::future::join_all(batch.iter().map(|entry| self.analyze_entry(entry)))
                    .await;

            for (entry, outcome) in batch.iter().zip(outcomes) {
                processed += 1;
                match outcome {
                    Ok(row) => {
                        info!(
                            file = %entry.file_name,
                            progress = %format!("{processed}/{total}"),
                            predicted = %row.predicted,
                            "entry analyzed"
                        );
                        results.insert(entry.path.clone(), row);
                    }
                    Err(err) => {
                        warn!(file = %entry.file_name, %err, "entry analysis failed, skipping");
                    }
                }
            }
        }

        results
    }

    async fn analyze_entry(&self, entry: &DatasetEntry) -> Result<AnalysisRow, ExtractError> {
        let verdict = self.pipeline.analyze(&entry.path).await?;

        // The batch flow re-infers risk from the narrative alone; the
        // structured scorer result is not consulted here. See `risk_text`
        // for the asymmetric fallback policy.
        let risk = risk_text::parse_risk_label(&verdict.narrative);
        let predicted = match risk {
            RiskTier::Safe => "SAFE",
            RiskTier::Medium | RiskTier::Dangerous => "MALWARE",
        };

        Ok(AnalysisRow {
            predicted: predicted.to_string(),
            risk_label: risk.label().to_string(),
            dangerous_permissions: mismatch::flag_dangerous_permissions(
                &verdict.detail.facts.permissions,
            ),
            summary: verdict.narrative,
        })
    }
}
