pub mod artifact;
pub mod batch;
pub mod behavior;
pub mod error;
pub mod facts;
pub mod mismatch;
pub mod model;
pub mod narrate;
pub mod package;
pub mod pipeline;
pub mod risk;

pub const TOOL_NAME: &str = "veridex";

/// JSON schema version of veridex verdicts.
/// This must be bumped only when the verdict layout changes semantically.
pub const SCHEMA_VERSION: &str = "0.1.0";
