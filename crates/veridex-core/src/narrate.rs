//! Narration stage: full analysis context in, free-text rationale out.
//!
//! Narration fails soft: any transport, auth, or parse failure is
//! swallowed and replaced by a fixed diagnostic string. The numeric
//! verdict never depends on this stage succeeding.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;

use crate::behavior::model::BehaviorTemplate;
use crate::facts::model::ArtifactFacts;
use crate::mismatch::model::Discrepancy;
use crate::model::ModelEndpoint;
use crate::risk::RiskTier;

/// Prefix of the diagnostic substituted for a failed narration.
pub const NARRATION_UNAVAILABLE: &str = "Narrative analysis unavailable";

pub struct Narrator {
    model: Arc<dyn ModelEndpoint>,
}

impl Narrator {
    pub fn new(model: Arc<dyn ModelEndpoint>) -> Self {
        Self { model }
    }

    pub async fn narrate(
        &self,
        facts: &ArtifactFacts,
        template: &BehaviorTemplate,
        discrepancies: &[Discrepancy],
        score: i32,
        tier: RiskTier,
    ) -> String {
        let prompt = build_prompt(facts, template, discrepancies, score, tier);
        match self.model.narrate(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, package = %facts.identity.package, "narration failed");
                format!("{NARRATION_UNAVAILABLE}: {err}")
            }
        }
    }
}

fn join(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        "none".to_string()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn build_prompt(
    facts: &ArtifactFacts,
    template: &BehaviorTemplate,
    discrepancies: &[Discrepancy],
    score: i32,
    tier: RiskTier,
) -> String {
    let mut prompt = format!(
        "You are a mobile security analyst reviewing an Android application.\n\
         \n\
         APP NAME: {}\n\
         PACKAGE: {}\n\
         DESCRIPTION: {}\n\
         PREDICTED CATEGORY: {}\n\
         \n\
         ACTUAL PERMISSIONS: {}\n\
         EXPECTED PERMISSIONS: {}\n\
         \n\
         ACTUAL APIS: {}\n\
         EXPECTED APIS: {}\n",
        facts.identity.name,
        facts.identity.package,
        facts.identity.description.as_deref().unwrap_or("none"),
        template.category,
        join(&facts.permissions),
        join(&template.expected_permissions),
        join(&facts.api_calls),
        join(&template.expected_apis),
    );

    if !facts.obfuscation_signals.is_empty() {
        prompt.push_str(&format!(
            "\nOBFUSCATION SIGNALS: {}\n",
            join(&facts.obfuscation_signals)
        ));
    }

    prompt.push_str(&format!(
        "\nRISK SCORE: {score} (computed tier: {tier})\nDETECTED ISSUES:\n"
    ));
    if discrepancies.is_empty() {
        prompt.push_str("- none\n");
    } else {
        for discrepancy in discrepancies {
            prompt.push_str(&format!("- {}\n", discrepancy.description));
        }
    }

    prompt.push_str(
        "\nAssess whether the declared identity of this application is consistent \
         with its observed behavior. Judge whether the requested permissions and \
         observed APIs fit the predicted category. A handful of dangerous \
         permissions does not by itself make an application malicious; unusual \
         combinations relative to the declared purpose do.\n\
         \n\
         Respond in exactly this format:\n\
         RISK LEVEL: [SAFE/MEDIUM/DANGEROUS]\n\
         ASSESSMENT: [concise rationale for the rating]\n\
         KEY ISSUES: [list the serious problems, if any]\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::model::Category;
    use crate::behavior::tables;
    use crate::error::ModelError;
    use crate::mismatch::model::DiscrepancyKind;
    use crate::package::PackageMetadata;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl ModelEndpoint for Echo {
        async fn classify(&self, _identity: &PackageMetadata) -> Result<String, ModelError> {
            Err(ModelError::Disabled)
        }

        async fn expand(
            &self,
            _identity: &PackageMetadata,
            _category: Category,
        ) -> Result<String, ModelError> {
            Err(ModelError::Disabled)
        }

        async fn narrate(&self, prompt: &str) -> Result<String, ModelError> {
            Ok(prompt.to_string())
        }
    }

    struct Down;

    #[async_trait]
    impl ModelEndpoint for Down {
        async fn classify(&self, _identity: &PackageMetadata) -> Result<String, ModelError> {
            Err(ModelError::Status { status: 503 })
        }

        async fn expand(
            &self,
            _identity: &PackageMetadata,
            _category: Category,
        ) -> Result<String, ModelError> {
            Err(ModelError::Status { status: 503 })
        }

        async fn narrate(&self, _prompt: &str) -> Result<String, ModelError> {
            Err(ModelError::Status { status: 503 })
        }
    }

    fn sample_facts() -> ArtifactFacts {
        ArtifactFacts {
            identity: PackageMetadata {
                name: "Torch Plus".into(),
                package: "com.example.torch".into(),
                description: Some("A flashlight".into()),
                version: Some("2.0".into()),
            },
            permissions: ["SEND_SMS".to_string(), "INTERNET".to_string()].into(),
            api_calls: ["sendTextMessage".to_string()].into(),
            obfuscation_signals: ["DexClassLoader".to_string()].into(),
            ..Default::default()
        }
    }

    fn sample_discrepancies() -> Vec<Discrepancy> {
        vec![Discrepancy {
            kind: DiscrepancyKind::UnexpectedPermission,
            description: "SEND_SMS is not an expected permission for a UTILITY app".into(),
            severity: 2,
        }]
    }

    #[tokio::test]
    async fn prompt_embeds_full_context_and_format_request() {
        let narrator = Narrator::new(Arc::new(Echo));
        let template = tables::template_for(Category::Utility);
        let prompt = narrator
            .narrate(&sample_facts(), &template, &sample_discrepancies(), 5, RiskTier::Dangerous)
            .await;

        assert!(prompt.contains("APP NAME: Torch Plus"));
        assert!(prompt.contains("PACKAGE: com.example.torch"));
        assert!(prompt.contains("PREDICTED CATEGORY: UTILITY"));
        assert!(prompt.contains("ACTUAL PERMISSIONS: INTERNET, SEND_SMS"));
        assert!(prompt.contains("OBFUSCATION SIGNALS: DexClassLoader"));
        assert!(prompt.contains("RISK SCORE: 5"));
        assert!(prompt.contains("- SEND_SMS is not an expected permission"));
        assert!(prompt.contains("RISK LEVEL: [SAFE/MEDIUM/DANGEROUS]"));
    }

    #[tokio::test]
    async fn obfuscation_line_is_omitted_when_empty() {
        let narrator = Narrator::new(Arc::new(Echo));
        let template = tables::template_for(Category::Utility);
        let mut facts = sample_facts();
        facts.obfuscation_signals.clear();

        let prompt = narrator
            .narrate(&facts, &template, &[], 0, RiskTier::Safe)
            .await;
        assert!(!prompt.contains("OBFUSCATION SIGNALS"));
        assert!(prompt.contains("- none"));
    }

    #[tokio::test]
    async fn failure_substitutes_fixed_diagnostic() {
        let narrator = Narrator::new(Arc::new(Down));
        let template = tables::template_for(Category::Utility);
        let text = narrator
            .narrate(&sample_facts(), &template, &[], 0, RiskTier::Safe)
            .await;

        assert!(text.starts_with(NARRATION_UNAVAILABLE));
        assert!(text.contains("503"));
    }
}
