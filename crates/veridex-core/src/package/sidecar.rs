//! Sidecar bridge to an external extraction tool.
//!
//! A package dump is the parser-output triple serialized as JSON and
//! stored next to the artifact (`app.apk` → `app.apk.json`). Paths that
//! already end in `.json` are read directly, which lets a dump stand in
//! for the artifact during evaluation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ExtractError;
use crate::package::{MethodBody, MethodScan, PackageMetadata, PackageReader};

/// On-disk layout of a package dump.
#[derive(Debug, Deserialize)]
struct PackageDump {
    metadata: PackageMetadata,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default)]
    methods: Vec<DumpMethod>,
}

/// One method entry in a dump. A method with `unreadable` set carries no
/// instructions and is surfaced as [`MethodScan::Unreadable`].
#[derive(Debug, Deserialize)]
struct DumpMethod {
    class: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    instructions: Vec<String>,
    #[serde(default)]
    unreadable: Option<String>,
}

/// Reads package dumps produced by an external extraction tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarReader;

impl SidecarReader {
    fn dump_path(path: &Path) -> PathBuf {
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            return path.to_path_buf();
        }
        let mut name = path.as_os_str().to_os_string();
        name.push(".json");
        PathBuf::from(name)
    }

    fn load(&self, path: &Path) -> Result<PackageDump, ExtractError> {
        let dump_path = Self::dump_path(path);
        let raw = fs::read_to_string(&dump_path).map_err(|source| ExtractError::Archive {
            path: dump_path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ExtractError::Dump {
            path: dump_path,
            source,
        })
    }
}

impl PackageReader for SidecarReader {
    fn metadata(&self, path: &Path) -> Result<PackageMetadata, ExtractError> {
        let dump = self.load(path)?;
        if dump.metadata.package.is_empty() {
            return Err(ExtractError::Metadata {
                path: path.to_path_buf(),
                reason: "dump declares no package identifier".into(),
            });
        }
        Ok(dump.metadata)
    }

    fn permissions(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        Ok(self.load(path)?.permissions)
    }

    fn methods(&self, path: &Path) -> Result<Vec<MethodScan>, ExtractError> {
        let dump = self.load(path)?;
        Ok(dump
            .methods
            .into_iter()
            .map(|m| match m.unreadable {
                Some(reason) => MethodScan::Unreadable {
                    class: m.class,
                    reason,
                },
                None => MethodScan::Body(MethodBody {
                    class: m.class,
                    name: m.name,
                    instructions: m.instructions,
                }),
            })
            .collect())
    }
}
