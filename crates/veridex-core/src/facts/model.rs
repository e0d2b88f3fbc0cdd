use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::package::PackageMetadata;

/// Observed identity and behavior of one artifact.
///
/// All observation sets are deduplicated and iterate in a stable order,
/// so identical parser output always produces identical facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFacts {
    /// Declared identity; `identity.package` is the stable join key.
    pub identity: PackageMetadata,

    /// Permissions declared in package metadata.
    pub permissions: BTreeSet<String>,

    /// Canonicalized names of sensitive API call sites observed in the
    /// instruction streams.
    pub api_calls: BTreeSet<String>,

    /// Structural obfuscation indicators observed in the instruction
    /// streams, one entry per indicator class.
    pub obfuscation_signals: BTreeSet<String>,

    /// Components exported by the manifest. Manifest parsing is not wired
    /// up yet; the field exists so verdict consumers do not change shape
    /// when it is.
    pub exported_components: BTreeSet<String>,

    /// Non-fatal extraction problems (skipped method bodies, unavailable
    /// lookups). Purely informational.
    pub warnings: Vec<String>,
}
