//! Batch evaluation over a labeled dataset.
//!
//! A run moves through Scanning → Analyzing → Reporting. Scanning and
//! reporting failures are fatal; a single entry failing during analysis
//! is logged and dropped so the rest of the corpus still gets evaluated.

pub mod csv;
pub mod metrics;
pub mod risk_text;
pub mod run;
pub mod scan;
