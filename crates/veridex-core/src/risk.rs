//! Risk scoring policy.
//!
//! The score is the plain sum of discrepancy severities; the tier is a
//! pure function of the score at the fixed breakpoints 0 and 3. There is
//! no other state: every verdict is reproducible from its discrepancy
//! list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mismatch::model::Discrepancy;

/// Discrete risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Safe,
    Medium,
    Dangerous,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Safe => "SAFE",
            RiskTier::Medium => "MEDIUM",
            RiskTier::Dangerous => "DANGEROUS",
        }
    }

    /// CI-compatible exit code mapping.
    pub fn exit_code(&self) -> i32 {
        match self {
            RiskTier::Safe => 0,
            RiskTier::Medium => 1,
            RiskTier::Dangerous => 2,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reduces a discrepancy list to a score and tier. Pure and total.
pub fn score(discrepancies: &[Discrepancy]) -> (i32, RiskTier) {
    let score: i32 = discrepancies.iter().map(|d| d.severity).sum();
    (score, tier_for(score))
}

/// Tier thresholds: score <= 0 Safe, 1..=2 Medium, >= 3 Dangerous.
pub fn tier_for(score: i32) -> RiskTier {
    match score {
        ..=0 => RiskTier::Safe,
        1..=2 => RiskTier::Medium,
        _ => RiskTier::Dangerous,
    }
}
