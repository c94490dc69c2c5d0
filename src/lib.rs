//! AVANI Crop Advisor
//!
//! Crop recommendation from soil and climate readings, served alongside the
//! AVANI informational site.
//!
//! Pipeline, leaves first:
//! - `soil`: soil type encoding (sandy/clay/loamy → 0/1/2)
//! - `features`: 8-column feature vector from a JSON payload
//! - `scaling`: fitted min-max then standard scaling
//! - `classifier`: `Classifier` trait and the tree-ensemble model
//! - `ranking`: top-1 and top-3 crops with percentage confidence
//! - `models`: the three artifacts loaded together, end-to-end `recommend`
//!
//! With the `api` feature (default) the `api_server` and `web` modules add the
//! Axum server, Askama pages and form handlers.

pub mod error;
pub mod soil;
pub mod crops;
pub mod features;
pub mod scaling;
pub mod classifier;
pub mod ranking;
pub mod models;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use error::RecommendError;
pub use soil::{SoilType, encode_soil_type};
pub use crops::{Crop, crop_name};
pub use features::FeatureVector;
pub use scaling::{MinMaxScaler, StandardScaler, ScalingPipeline};
pub use classifier::{Classifier, ForestClassifier};
pub use ranking::{Recommendation, CropConfidence, rank};
pub use models::ModelBundle;
pub use config::ServerConfig;

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
