//! Model bundle
//!
//! The three artifacts fitted offline (classifier, min-max scaler,
//! standardizer) loaded together, plus the end-to-end recommendation
//! pipeline that runs over them. A bundle is immutable once built and is
//! shared read-only between requests.

use std::path::Path;
use std::sync::Arc;
use anyhow::{Context, Result};
use serde_json::Value;

use crate::classifier::{argmax, Classifier, ForestClassifier};
use crate::error::RecommendError;
use crate::features::FeatureVector;
use crate::ranking::{rank, Recommendation};
use crate::scaling::{MinMaxScaler, ScalingPipeline, StandardScaler};

pub const MODEL_FILE: &str = "model.json";
pub const MIN_MAX_FILE: &str = "minmaxscaler.json";
pub const STANDARD_FILE: &str = "standscaler.json";

pub struct ModelBundle {
    classifier: Arc<dyn Classifier>,
    scaling: ScalingPipeline,
}

impl ModelBundle {
    pub fn new(classifier: Arc<dyn Classifier>, scaling: ScalingPipeline) -> Self {
        Self { classifier, scaling }
    }

    /// Load all three artifacts from `dir`. Any failure fails the whole bundle.
    pub fn load(dir: &Path) -> Result<Self> {
        let classifier = ForestClassifier::load(&dir.join(MODEL_FILE))
            .with_context(|| format!("Failed to load classifier from {:?}", dir))?;
        tracing::info!(
            "Loaded classifier: {} trees, {} classes",
            classifier.n_trees(),
            classifier.classes().len()
        );

        let min_max = MinMaxScaler::load(&dir.join(MIN_MAX_FILE))?;
        let standard = StandardScaler::load(&dir.join(STANDARD_FILE))?;
        tracing::info!("Loaded min-max and standard scalers");

        Ok(Self::new(
            Arc::new(classifier),
            ScalingPipeline::new(min_max, standard),
        ))
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn scaling(&self) -> &ScalingPipeline {
        &self.scaling
    }

    /// Payload → features → scaled features → probabilities → ranked crops.
    pub fn recommend(&self, payload: &Value) -> Result<Recommendation, RecommendError> {
        let features = FeatureVector::from_payload(payload)?;
        self.recommend_features(&features)
    }

    pub fn recommend_features(&self, features: &FeatureVector) -> Result<Recommendation, RecommendError> {
        let scaled = self.scaling.transform(features.as_slice())?;

        let probabilities = self.classifier.predict_probabilities(&scaled)?;
        let recommendation = rank(&probabilities, self.classifier.classes())?;

        // Plain arg-max class, as `Classifier::predict` would report it
        let predicted = argmax(&probabilities)
            .and_then(|i| self.classifier.classes().get(i).copied())
            .ok_or_else(|| RecommendError::Computation("no predicted class".to_string()))?;
        if crate::crops::crop_name(predicted) != recommendation.recommended_crop {
            tracing::warn!(
                "Classifier predicted class {} but its probabilities favour {}",
                predicted,
                recommendation.recommended_crop
            );
        }

        Ok(recommendation)
    }
}
