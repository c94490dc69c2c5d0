// Page handlers for HTML rendering with Askama

use axum::response::{Html, IntoResponse};
use askama::Template;

/// Render a template, falling back to a plain error body.
pub(crate) fn render<T: Template>(template: T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template error: {}", e);
        format!("Template error: {}", e)
    }))
}

// ============================================================================
// Home Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub crop_count: usize,
}

pub async fn home_page() -> impl IntoResponse {
    render(HomeTemplate {
        crop_count: crate::crops::Crop::ALL.len(),
    })
}

// ============================================================================
// Informational Pages
// ============================================================================

#[derive(Template)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate;

#[derive(Template)]
#[template(path = "pages/language.html")]
pub struct LanguageTemplate;

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate;

#[derive(Template)]
#[template(path = "pages/solution.html")]
pub struct SolutionTemplate;

#[derive(Template)]
#[template(path = "pages/chat.html")]
pub struct ChatTemplate;

#[derive(Template)]
#[template(path = "pages/shop.html")]
pub struct ShopTemplate;

#[derive(Template)]
#[template(path = "pages/community.html")]
pub struct CommunityTemplate;

pub async fn about_page() -> impl IntoResponse {
    render(AboutTemplate)
}

pub async fn language_page() -> impl IntoResponse {
    render(LanguageTemplate)
}

pub async fn login_page() -> impl IntoResponse {
    render(LoginTemplate)
}

pub async fn solution_page() -> impl IntoResponse {
    render(SolutionTemplate)
}

pub async fn chat_page() -> impl IntoResponse {
    render(ChatTemplate)
}

pub async fn shop_page() -> impl IntoResponse {
    render(ShopTemplate)
}

pub async fn community_page() -> impl IntoResponse {
    render(CommunityTemplate)
}

// ============================================================================
// Recommendation Flow
// ============================================================================

/// Intake form; re-rendered with `error` when a submission can't be read
#[derive(Template, Default)]
#[template(path = "pages/recommendation.html")]
pub struct RecommendationTemplate {
    pub error: Option<String>,
}

/// Soil/climate form that calls `/recommend`
#[derive(Template)]
#[template(path = "pages/crop_analysis.html")]
pub struct CropAnalysisTemplate {
    pub soil_types: Vec<&'static str>,
}

pub async fn recommendation_page() -> impl IntoResponse {
    render(RecommendationTemplate::default())
}

pub async fn crop_analysis_page() -> impl IntoResponse {
    render(CropAnalysisTemplate {
        soil_types: crate::soil::SoilType::ALL.iter().map(|s| s.as_str()).collect(),
    })
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Template, Default)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub success: Option<String>,
    pub error: Option<String>,
}

pub async fn contact_page() -> impl IntoResponse {
    render(ContactTemplate::default())
}
