//! Behavior inference: identity metadata in, expected-behavior template
//! out.
//!
//! Category resolution tries the keyword rules first and only then the
//! model endpoint; template construction unions the static profile with
//! whatever the model contributes. Model failure at either step is
//! recovered here and never propagates; prediction is infallible.

use std::sync::Arc;

use tracing::debug;

use crate::behavior::model::{BehaviorTemplate, Category};
use crate::behavior::{parse, tables};
use crate::model::ModelEndpoint;
use crate::package::PackageMetadata;

pub struct BehaviorPredictor {
    model: Arc<dyn ModelEndpoint>,
}

impl BehaviorPredictor {
    pub fn new(model: Arc<dyn ModelEndpoint>) -> Self {
        Self { model }
    }

    pub async fn predict(&self, identity: &PackageMetadata) -> BehaviorTemplate {
        let category = self.predict_category(identity).await;
        let mut template = tables::template_for(category);

        match self.model.expand(identity, category).await {
            Ok(text) => {
                let (permissions, apis) = parse::parse_behavior_response(&text);
                template.expected_permissions.extend(permissions);
                template.expected_apis.extend(apis);
            }
            Err(err) => {
                debug!(%err, %category, "behavior expansion unavailable, using static template");
            }
        }

        template
    }

    async fn predict_category(&self, identity: &PackageMetadata) -> Category {
        if let Some(category) = tables::match_category(identity) {
            return category;
        }

        match self.model.classify(identity).await {
            Ok(text) => parse::parse_category_response(&text).unwrap_or(Category::Other),
            Err(err) => {
                debug!(%err, "category classification unavailable, defaulting to OTHER");
                Category::Other
            }
        }
    }
}
