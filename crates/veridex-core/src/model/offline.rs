use async_trait::async_trait;

use crate::behavior::model::Category;
use crate::error::ModelError;
use crate::model::ModelEndpoint;
use crate::package::PackageMetadata;

/// Endpoint used when no model is configured.
///
/// Every call fails with [`ModelError::Disabled`]; category prediction
/// then degrades to the keyword rules and the OTHER fallback, narration
/// to its fixed diagnostic string. The result is fully deterministic
/// rule-only operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopModel;

#[async_trait]
impl ModelEndpoint for NoopModel {
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

    async fn narrate(&self, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::Disabled)
    }
}
