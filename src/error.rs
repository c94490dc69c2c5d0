//! Error types for the recommendation pipeline
//!
//! Every failure on the `/recommend` path is one of these variants, so the
//! HTTP layer branches on the kind instead of on message text.

use thiserror::Error;

/// Message returned for every request while the model artifacts are missing.
pub const MODELS_UNAVAILABLE_MESSAGE: &str = "ML models not loaded properly";

/// Message returned when `soil_type` is outside the supported set.
pub const INVALID_SOIL_MESSAGE: &str = "Invalid soil type. Choose from sandy, clay, loamy.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// One or more startup artifacts failed to load. Permanent until restart.
    #[error("{}", MODELS_UNAVAILABLE_MESSAGE)]
    ModelsUnavailable,

    /// `soil_type` is not sandy, clay or loamy
    #[error("{}", INVALID_SOIL_MESSAGE)]
    InvalidSoilType,

    /// A required field is missing or has the wrong type
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// The request body is not a JSON object
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Scaling, classification or ranking broke its contract
    #[error("Prediction failed: {0}")]
    Computation(String),
}

impl RecommendError {
    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        RecommendError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Per-request input problems, as opposed to startup or computation failures.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            RecommendError::InvalidSoilType
                | RecommendError::InvalidField { .. }
                | RecommendError::MalformedBody(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
