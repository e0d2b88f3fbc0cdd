//! Error taxonomy for the analysis pipeline and batch runner.
//!
//! Propagation policy:
//! - `ExtractError` is fatal for the artifact it names. Per-method read
//!   problems degrade to facts warnings instead and never surface here.
//! - `ModelError` never escapes the pipeline: the behavior predictor
//!   degrades to its static defaults and the narrator substitutes a fixed
//!   diagnostic string. The numeric verdict outlives every model failure.
//! - `BatchError` is fatal for a batch run as a whole. Failures of a
//!   single entry inside a run are logged and dropped, not raised.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a package archive into facts.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The artifact itself could not be read from disk.
    #[error("failed to read package archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser produced no usable identity metadata.
    #[error("package metadata unreadable for {}: {reason}", .path.display())]
    Metadata { path: PathBuf, reason: String },

    /// The parser-output dump next to the artifact is not valid JSON.
    #[error("package dump malformed for {}: {source}", .path.display())]
    Dump {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of the hosted model endpoint.
///
/// These are always recovered locally; they exist as a type so callers can
/// log the reason before degrading.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model transport error: {0}")]
    Transport(String),

    #[error("model call timed out")]
    Timeout,

    #[error("model endpoint returned status {status}")]
    Status { status: u16 },

    #[error("model response malformed: {0}")]
    Malformed(String),

    /// No endpoint is configured (offline / rule-only operation).
    #[error("model endpoint disabled")]
    Disabled,
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ModelError::Timeout
        } else {
            ModelError::Transport(err.to_string())
        }
    }
}

/// Failures of a batch evaluation run.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The dataset root does not follow the required layout. The message
    /// carries the remediation: two category directories, `safe` and
    /// `malware`, each holding `.apk` artifacts.
    #[error(
        "invalid dataset layout at {}: {reason} \
         (expected exactly two category directories, `safe` and `malware`, \
         each containing .apk files)",
        .root.display()
    )]
    DatasetStructure { root: PathBuf, reason: String },

    /// Every entry failed. Usually connectivity or model quota.
    #[error(
        "no artifact could be analyzed; check network connectivity \
         and the model API key or quota"
    )]
    NoResults,

    /// A report file could not be written.
    #[error("failed to write report {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_structure_message_names_remediation() {
        let err = BatchError::DatasetStructure {
            root: PathBuf::from("/data/corpus"),
            reason: "no category directories found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/corpus"));
        assert!(msg.contains("safe"));
        assert!(msg.contains("malware"));
    }

    #[test]
    fn no_results_message_points_at_connectivity() {
        let msg = BatchError::NoResults.to_string();
        assert!(msg.contains("connectivity"));
        assert!(msg.contains("quota"));
    }
}
