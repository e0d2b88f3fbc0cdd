//! Narrow capability interface to the hosted language model.
//!
//! The pipeline only ever needs three operations, and every caller must
//! recover locally when they fail. Implementations can be swapped for a
//! deterministic stub without touching pipeline logic.

pub mod gemini;
pub mod offline;

use async_trait::async_trait;

use crate::behavior::model::Category;
use crate::error::ModelError;
use crate::package::PackageMetadata;

#[async_trait]
pub trait ModelEndpoint: Send + Sync {
    /// Classify identity metadata into one closed-vocabulary category
    /// token. Returns the raw response text; token extraction is the
    /// caller's concern.
    async fn classify(&self, identity: &PackageMetadata) -> Result<String, ModelError>;

    /// Expand a category into expected permissions and APIs as
    /// `PERMISSIONS:` / `APIS:` text.
    async fn expand(
        &self,
        identity: &PackageMetadata,
        category: Category,
    ) -> Result<String, ModelError>;

    /// Narrate a fully assembled analysis context.
    async fn narrate(&self, prompt: &str) -> Result<String, ModelError>;
}
