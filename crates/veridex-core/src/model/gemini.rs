//! HTTP client for a Gemini-style generateContent endpoint.
//!
//! Only the wire contract matters here: a POST of
//! `{contents:[{parts:[{text}]}],generationConfig:{...}}` answered by
//! `candidates[0].content.parts[0].text`. Every failure mode (transport,
//! timeout, non-200 status, unexpected body shape) maps to a
//! [`ModelError`] for the caller to recover from.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::behavior::model::Category;
use crate::error::ModelError;
use crate::model::ModelEndpoint;
use crate::package::PackageMetadata;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-04-17:generateContent";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Full generateContent URL, without the key parameter.
    pub endpoint: String,

    pub api_key: String,

    pub temperature: f32,

    pub max_output_tokens: Option<u32>,

    /// Hard per-request deadline. An unresponsive endpoint must fail the
    /// one task that called it, never stall a whole batch.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            temperature: 0.2,
            max_output_tokens: None,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ModelError::Transport(err.to_string()))?;
        Ok(Self { config, http })
    }

    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let mut generation_config = serde_json::json!({
            "temperature": self.config.temperature,
        });
        if let Some(max) = self.config.max_output_tokens {
            generation_config["maxOutputTokens"] = max.into();
        }

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        });

        let response = self
            .http
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| ModelError::Malformed(err.to_string()))?;
        candidate_text(&payload)
    }
}

/// Pulls the response text out of a generateContent payload.
fn candidate_text(payload: &Value) -> Result<String, ModelError> {
    payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            ModelError::Malformed("missing candidates[0].content.parts[0].text".into())
        })
}

fn classify_prompt(identity: &PackageMetadata) -> String {
    format!(
        "Classify the following Android application into EXACTLY ONE of these categories:\n\
         CAMERA, SOCIAL, GAME, PRODUCTIVITY, MUSIC, VIDEO, SHOPPING, NEWS, WEATHER, FINANCE, \
         HEALTH, EDUCATION, TRAVEL, COMMUNICATION, UTILITY, OTHER\n\
         \n\
         Name: {}\n\
         Package: {}\n\
         Description: {}\n\
         \n\
         Reply with exactly one category keyword.",
        identity.name,
        identity.package,
        identity.description.as_deref().unwrap_or("none"),
    )
}

fn expand_prompt(identity: &PackageMetadata, category: Category) -> String {
    format!(
        "For a \"{category}\" application named \"{}\", list:\n\
         1. The Android permissions it needs\n\
         2. The APIs it typically uses\n\
         \n\
         List only what is genuinely required for the core functionality.\n\
         \n\
         Format:\n\
         PERMISSIONS: permission1, permission2, ...\n\
         APIS: api1, api2, ...",
        identity.name,
    )
}

#[async_trait]
impl ModelEndpoint for GeminiClient {
    async fn classify(&self, identity: &PackageMetadata) -> Result<String, ModelError> {
        self.generate(&classify_prompt(identity)).await
    }

    async fn expand(
        &self,
        identity: &PackageMetadata,
        category: Category,
    ) -> Result<String, ModelError> {
        self.generate(&expand_prompt(identity, category)).await
    }

    async fn narrate(&self, prompt: &str) -> Result<String, ModelError> {
        self.generate(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_text_follows_success_path() {
        let payload = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "RISK LEVEL: SAFE" } ] } }
            ]
        });
        assert_eq!(candidate_text(&payload).unwrap(), "RISK LEVEL: SAFE");
    }

    #[test]
    fn missing_candidates_is_malformed() {
        let payload = serde_json::json!({ "promptFeedback": {} });
        assert!(matches!(
            candidate_text(&payload),
            Err(ModelError::Malformed(_))
        ));
    }

    #[test]
    fn non_string_text_is_malformed() {
        let payload = serde_json::json!({
            "candidates": [ { "content": { "parts": [ { "text": 42 } ] } } ]
        });
        assert!(candidate_text(&payload).is_err());
    }

    #[test]
    fn classify_prompt_embeds_identity_and_vocabulary() {
        let prompt = classify_prompt(&PackageMetadata {
            name: "Torch Plus".into(),
            package: "com.example.torch".into(),
            description: None,
            version: None,
        });
        assert!(prompt.contains("Torch Plus"));
        assert!(prompt.contains("com.example.torch"));
        assert!(prompt.contains("COMMUNICATION"));
        assert!(prompt.contains("exactly one category keyword"));
    }

    #[test]
    fn expand_prompt_requests_labeled_sections() {
        let prompt = expand_prompt(
            &PackageMetadata {
                name: "Torch Plus".into(),
                package: "com.example.torch".into(),
                description: None,
                version: None,
            },
            Category::Utility,
        );
        assert!(prompt.contains("\"UTILITY\""));
        assert!(prompt.contains("PERMISSIONS:"));
        assert!(prompt.contains("APIS:"));
    }
}
