//! The five-stage analysis pipeline.
//!
//! Data flows strictly forward: extraction → behavior inference →
//! mismatch detection → risk scoring → narration. The numeric verdict is
//! fixed before narration runs and survives any narration failure.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifact::{self, ArtifactInfo};
use crate::behavior::model::BehaviorTemplate;
use crate::behavior::predict::BehaviorPredictor;
use crate::error::ExtractError;
use crate::facts::extract::Extractor;
use crate::facts::model::ArtifactFacts;
use crate::mismatch::{self, model::Discrepancy};
use crate::model::ModelEndpoint;
use crate::narrate::Narrator;
use crate::package::PackageReader;
use crate::risk::{self, RiskTier};
use crate::SCHEMA_VERSION;

/// Final output for one artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub schema_version: String,

    pub artifact: ArtifactInfo,

    /// Sum of discrepancy severities.
    pub score: i32,

    pub tier: RiskTier,

    /// Discrepancy descriptions, in detection order.
    pub factors: Vec<String>,

    /// Model rationale, or the fixed narration diagnostic.
    pub narrative: String,

    pub detail: VerdictDetail,
}

/// Full facts + template + discrepancy bundle behind a verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictDetail {
    pub facts: ArtifactFacts,
    pub template: BehaviorTemplate,
    pub discrepancies: Vec<Discrepancy>,
}

pub struct Pipeline {
    extractor: Extractor,
    predictor: BehaviorPredictor,
    narrator: Narrator,
}

impl Pipeline {
    pub fn new(reader: Arc<dyn PackageReader>, model: Arc<dyn ModelEndpoint>) -> Self {
        Self {
            extractor: Extractor::new(reader),
            predictor: BehaviorPredictor::new(Arc::clone(&model)),
            narrator: Narrator::new(model),
        }
    }

    /// Runs the full pipeline over one artifact.
    ///
    /// Fails only when the artifact or its identity metadata cannot be
    /// read; every model failure downstream degrades inside its stage.
    pub async fn analyze(&self, path: &Path) -> Result<Verdict, ExtractError> {
        let artifact = artifact::read_artifact(path)?;
        let facts = self.extractor.extract(path)?;
        debug!(
            package = %facts.identity.package,
            permissions = facts.permissions.len(),
            apis = facts.api_calls.len(),
            "facts extracted"
        );

        let template = self.predictor.predict(&facts.identity).await;
        let discrepancies = mismatch::detect(&facts, &template);
        let (score, tier) = risk::score(&discrepancies);
        debug!(package = %facts.identity.package, score, %tier, "risk computed");

        let narrative = self
            .narrator
            .narrate(&facts, &template, &discrepancies, score, tier)
            .await;

        Ok(Verdict {
            schema_version: SCHEMA_VERSION.to_string(),
            artifact,
            score,
            tier,
            factors: discrepancies.iter().map(|d| d.description.clone()).collect(),
            narrative,
            detail: VerdictDetail {
                facts,
                template,
                discrepancies,
            },
        })
    }
}

/// Human-oriented rendering of a verdict for terminal output.
pub fn render_text(verdict: &Verdict) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} [{}]\n",
        verdict.detail.facts.identity.name, verdict.detail.facts.identity.package
    ));
    out.push_str(&format!("Artifact: {}\n", verdict.artifact.path));
    out.push_str(&format!(
        "Risk tier: {} (score {})\n",
        verdict.tier, verdict.score
    ));
    out.push_str(&format!(
        "Predicted category: {}\n",
        verdict.detail.template.category
    ));
    if verdict.factors.is_empty() {
        out.push_str("No discrepancies detected.\n");
    } else {
        out.push_str("Discrepancies:\n");
        for factor in &verdict.factors {
            out.push_str(&format!("  - {factor}\n"));
        }
    }
    out.push_str("\n");
    out.push_str(&verdict.narrative);
    if !verdict.narrative.ends_with('\n') {
        out.push('\n');
    }
    out
}
