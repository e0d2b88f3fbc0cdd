//! Risk-tier recovery from narrative free text.
//!
//! The batch path re-derives risk from the model's prose instead of the
//! structured scorer result. Three attempts, in order: the `RISK LEVEL:`
//! marker with a constrained label, a line scan for `RISK LEVEL:` /
//! `ASSESSMENT:` markers, then a whole-text heuristic. Anything still
//! ambiguous is rated Dangerous: the policy prefers false positives over
//! false negatives when text cannot be parsed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::risk::RiskTier;

static RISK_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)RISK\s+LEVEL:\s*\[?\s*(SAFE|MEDIUM|DANGEROUS)").expect("static pattern")
});

pub fn parse_risk_label(text: &str) -> RiskTier {
    if let Some(captures) = RISK_MARKER.captures(text) {
        return match captures[1].to_uppercase().as_str() {
            "SAFE" => RiskTier::Safe,
            "MEDIUM" => RiskTier::Medium,
            _ => RiskTier::Dangerous,
        };
    }

    for line in text.lines() {
        let upper = line.to_uppercase();
        if upper.contains("RISK LEVEL:") || upper.contains("ASSESSMENT:") {
            return if mentions_safe(&upper) {
                RiskTier::Safe
            } else {
                RiskTier::Dangerous
            };
        }
    }

    let upper = text.to_uppercase();
    if mentions_safe(&upper) && !upper.contains("DANGEROUS") {
        RiskTier::Safe
    } else {
        RiskTier::Dangerous
    }
}

/// `SAFE` counts only when not negated as `UNSAFE` or `NOT SAFE`.
fn mentions_safe(upper: &str) -> bool {
    upper.contains("SAFE") && !upper.contains("UNSAFE") && !upper.contains("NOT SAFE")
}
