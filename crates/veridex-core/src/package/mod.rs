//! Boundary to the external package-archive parser.
//!
//! The pipeline never decodes archives itself. It consumes the parser's
//! output triple (identity metadata, declared permission list, and the
//! instruction streams of every method) through [`PackageReader`].
//! Implementations wrap whatever parser the host environment provides;
//! [`sidecar::SidecarReader`] bridges to a JSON dump of that triple.

pub mod sidecar;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Identity metadata declared by a package archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Human-facing application name.
    pub name: String,

    /// Stable package identifier; the join key for batch results.
    pub package: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

/// One decoded method body as an opaque instruction listing.
///
/// Instructions are matched by substring against fixed pattern tables;
/// their internal structure is deliberately not modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBody {
    pub class: String,
    pub name: String,
    pub instructions: Vec<String>,
}

/// One entry of a method enumeration.
///
/// A body the parser could not decode is reported as `Unreadable` so the
/// extractor can skip it and keep going. A corrupt method is never fatal
/// for the artifact.
#[derive(Debug, Clone)]
pub enum MethodScan {
    Body(MethodBody),
    Unreadable { class: String, reason: String },
}

/// Read access to parser output for one artifact path.
///
/// `metadata` is the only lookup whose failure aborts extraction; the
/// other two degrade to empty observations.
pub trait PackageReader: Send + Sync {
    fn metadata(&self, path: &Path) -> Result<PackageMetadata, ExtractError>;

    fn permissions(&self, path: &Path) -> Result<Vec<String>, ExtractError>;

    fn methods(&self, path: &Path) -> Result<Vec<MethodScan>, ExtractError>;
}
