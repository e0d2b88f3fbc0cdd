use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ExtractError;

/// Artifact identity bound to a verdict.
///
/// The fingerprint depends **only** on the file bytes. Filesystem
/// metadata (timestamps, permissions, etc.) is ignored so identical
/// artifacts always carry identical identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub path: String,

    pub size_bytes: u64,

    /// Hex-encoded SHA-256 of the artifact bytes.
    pub sha256: String,
}

/// Read an artifact and compute its stable cryptographic identity.
pub fn read_artifact(path: &Path) -> Result<ArtifactInfo, ExtractError> {
    let bytes = fs::read(path).map_err(|source| ExtractError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hasher.finalize();

    Ok(ArtifactInfo {
        path: path.display().to_string(),
        size_bytes: bytes.len() as u64,
        sha256: hex::encode(digest),
    })
}
