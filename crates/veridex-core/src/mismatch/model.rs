use serde::{Deserialize, Serialize};

/// Kinds of deviation between observed facts and the expected template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    UnexpectedPermission,
    MissingCorePermission,
    UnexpectedApi,
    ObfuscationSignal,
}

/// One quantified deviation.
///
/// The severity sign encodes direction: positive raises risk, negative
/// lowers it. Missing a core permission is a mild negative-risk anomaly:
/// behavioral incompleteness, not a threat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub kind: DiscrepancyKind,
    pub description: String,
    pub severity: i32,
}
