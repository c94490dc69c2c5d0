// Axum server: recommendation API, health check, pages and form intake
//
// Model artifacts are loaded once into AppState at startup. If any of them is
// missing the site still serves pages; only /recommend degrades.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::RecommendError;
use crate::models::ModelBundle;
use crate::ranking::Recommendation;
use crate::web::handlers::{forms, pages};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    /// `None` when loading failed at startup
    pub models: Option<Arc<ModelBundle>>,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Load model artifacts from `model_dir`. Failure is logged, not returned.
    pub fn new(model_dir: &Path, static_dir: &Path) -> Self {
        tracing::info!("Loading ML models from {:?}...", model_dir);
        let models = match ModelBundle::load(model_dir) {
            Ok(bundle) => {
                tracing::info!("ML models loaded successfully");
                Some(Arc::new(bundle))
            }
            Err(e) => {
                tracing::error!("ML models unavailable, /recommend disabled: {:#}", e);
                None
            }
        };

        Self {
            models,
            static_dir: static_dir.to_path_buf(),
        }
    }

    pub fn with_models(bundle: ModelBundle, static_dir: &Path) -> Self {
        Self {
            models: Some(Arc::new(bundle)),
            static_dir: static_dir.to_path_buf(),
        }
    }

    pub fn without_models(static_dir: &Path) -> Self {
        Self {
            models: None,
            static_dir: static_dir.to_path_buf(),
        }
    }

    pub fn models_loaded(&self) -> bool {
        self.models.is_some()
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Recommendation API (JSON)
        .route("/recommend", post(recommend))

        // Pages
        .route("/", get(pages::home_page))
        .route("/about", get(pages::about_page))
        .route("/language", get(pages::language_page))
        .route("/login", get(pages::login_page))
        .route("/solution", get(pages::solution_page))
        .route("/recommendation", get(pages::recommendation_page))
        .route("/chat", get(pages::chat_page))
        .route("/contact", get(pages::contact_page))
        .route("/crop-analysis", get(pages::crop_analysis_page))
        .route("/shop", get(pages::shop_page))
        .route("/community", get(pages::community_page))

        // Form intake
        .route("/submit-recommendation", post(forms::submit_recommendation))
        .route("/submit-contact", post(forms::submit_contact))

        // Stylesheets, scripts, images
        .nest_service("/static", static_files)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "models_loaded": state.models_loaded(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// The models check runs before the body is looked at, so a server without
/// models answers every call the same way.
async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Recommendation>, RecommendError> {
    let models = state.models.as_deref().ok_or(RecommendError::ModelsUnavailable)?;
    let Json(payload) = payload.map_err(|e| RecommendError::MalformedBody(e.body_text()))?;

    let start = std::time::Instant::now();
    let recommendation = models.recommend(&payload).map_err(|e| {
        if e.is_invalid_input() {
            tracing::warn!("Rejected recommendation request: {}", e);
        } else {
            tracing::error!("Recommendation failed: {}", e);
        }
        e
    })?;

    tracing::debug!(
        "Recommended {} ({}%) in {:?}",
        recommendation.recommended_crop,
        recommendation.confidence,
        start.elapsed()
    );

    Ok(Json(recommendation))
}

// ============================================================================
// Error Handling
// ============================================================================

impl IntoResponse for RecommendError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            RecommendError::InvalidSoilType => StatusCode::BAD_REQUEST,
            RecommendError::ModelsUnavailable
            | RecommendError::InvalidField { .. }
            | RecommendError::MalformedBody(_)
            | RecommendError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
