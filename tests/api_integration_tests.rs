// API Integration Tests
//
// Purpose: Drive the router end to end with fixture model artifacts
// Run with: cargo test --test api_integration_tests

mod common;

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use avani_crop_advisor::{AppState, create_router};
    use serde_json::{json, Value};
    use std::path::Path;
    use tempfile::TempDir;
    use tower::ServiceExt; // for oneshot

    use super::common;

    // Helper: app with fixture models; keep the TempDirs alive for the test
    fn create_test_app() -> (axum::Router, TempDir, TempDir) {
        let models = common::model_dir();
        let static_dir = tempfile::tempdir().unwrap();
        let state = AppState::new(models.path(), static_dir.path());
        assert!(state.models_loaded(), "fixture models should load");
        (create_router(state), models, static_dir)
    }

    // Helper: app whose model directory is empty
    fn create_app_without_models() -> (axum::Router, TempDir) {
        let empty = tempfile::tempdir().unwrap();
        let state = AppState::new(&empty.path().join("models"), empty.path());
        assert!(!state.models_loaded());
        (create_router(state), empty)
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    async fn text_response(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        String::from_utf8(body.to_vec()).expect("Response is not UTF-8")
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let (app, _models, _static) = create_test_app();

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["models_loaded"], true);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_health_check_without_models() {
        let (app, _dir) = create_app_without_models();

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["models_loaded"], false);
    }

    // =========================================================================
    // Section 2: Recommendation - Success Paths
    // =========================================================================

    #[tokio::test]
    async fn test_recommend_sample_reading() {
        let (app, _models, _static) = create_test_app();

        let response = app
            .oneshot(post_json("/recommend", common::sample_payload().to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["recommended_crop"], "rice");
        assert_eq!(body["confidence"].as_f64().unwrap(), 50.0);

        let top = body["top_recommendations"].as_array().unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0]["crop"], "rice");
        assert_eq!(top[1]["crop"], "jute");
        assert_eq!(top[2]["crop"], "coconut");
        assert_eq!(top[0]["confidence"], body["confidence"]);
    }

    #[tokio::test]
    async fn test_recommend_response_properties() {
        let (app, _models, _static) = create_test_app();

        let response = app
            .oneshot(post_json("/recommend", common::dry_payload().to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let crop = body["recommended_crop"].as_str().unwrap();
        assert!(common::CROP_TABLE.contains(&crop));

        let confidences: Vec<f64> = body["top_recommendations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["confidence"].as_f64().unwrap())
            .collect();
        assert_eq!(confidences.len(), 3);
        for pair in confidences.windows(2) {
            assert!(pair[0] >= pair[1], "confidences not sorted: {:?}", confidences);
        }
        for c in &confidences {
            assert!((0.0..=100.0).contains(c));
        }
    }

    #[tokio::test]
    async fn test_recommend_accepts_numeric_strings() {
        let (app, _models, _static) = create_test_app();

        // Shape sent by the crop analysis page (form values are strings)
        let payload = json!({
            "N": "90", "P": "42", "K": "43",
            "temperature": "20.8", "humidity": "82", "ph": "6.5", "rainfall": "202.9",
            "soil_type": "Loamy"
        });
        let response = app
            .oneshot(post_json("/recommend", payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["recommended_crop"], "rice");
    }

    #[tokio::test]
    async fn test_recommend_is_idempotent() {
        let (app, _models, _static) = create_test_app();

        let first = app
            .clone()
            .oneshot(post_json("/recommend", common::sample_payload().to_string()))
            .await
            .unwrap();
        let second = app
            .oneshot(post_json("/recommend", common::sample_payload().to_string()))
            .await
            .unwrap();

        assert_eq!(json_response(first).await, json_response(second).await);
    }

    // =========================================================================
    // Section 3: Recommendation - Error Paths
    // =========================================================================

    #[tokio::test]
    async fn test_recommend_invalid_soil_type() {
        let (app, _models, _static) = create_test_app();

        let mut payload = common::sample_payload();
        payload["soil_type"] = json!("peat");
        let response = app
            .oneshot(post_json("/recommend", payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert_eq!(body["error"], "Invalid soil type. Choose from sandy, clay, loamy.");
    }

    #[tokio::test]
    async fn test_recommend_missing_field() {
        let (app, _models, _static) = create_test_app();

        let mut payload = common::sample_payload();
        payload.as_object_mut().unwrap().remove("rainfall");
        let response = app
            .oneshot(post_json("/recommend", payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("rainfall"));
    }

    #[tokio::test]
    async fn test_recommend_non_numeric_field() {
        let (app, _models, _static) = create_test_app();

        let mut payload = common::sample_payload();
        payload["ph"] = json!("acidic");
        let response = app
            .oneshot(post_json("/recommend", payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("ph"));
    }

    #[tokio::test]
    async fn test_recommend_malformed_body() {
        let (app, _models, _static) = create_test_app();

        let response = app
            .oneshot(post_json("/recommend", "{ N: 90".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_recommend_without_models() {
        // Same answer whether the payload is valid, invalid or unreadable
        let bodies = [
            common::sample_payload().to_string(),
            json!({"soil_type": "peat"}).to_string(),
            "not json".to_string(),
        ];

        for body in bodies {
            let (app, _dir) = create_app_without_models();
            let response = app.oneshot(post_json("/recommend", body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let json = json_response(response).await;
            assert_eq!(json["error"], "ML models not loaded properly");
        }
    }

    #[tokio::test]
    async fn test_recommend_rejects_get() {
        let (app, _models, _static) = create_test_app();

        let response = app.oneshot(get("/recommend")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    // =========================================================================
    // Section 4: Pages
    // =========================================================================

    #[tokio::test]
    async fn test_all_pages_render() {
        let pages = [
            "/", "/about", "/language", "/login", "/solution", "/recommendation",
            "/chat", "/contact", "/crop-analysis", "/shop", "/community",
        ];

        for page in pages {
            let (app, _dir) = create_app_without_models();
            let response = app.oneshot(get(page)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "page {}", page);

            let html = text_response(response).await;
            assert!(html.contains("<html"), "page {} did not render HTML", page);
            assert!(!html.contains("Template error"), "page {} failed to render", page);
        }
    }

    #[tokio::test]
    async fn test_crop_analysis_offers_soil_types() {
        let (app, _models, _static) = create_test_app();

        let response = app.oneshot(get("/crop-analysis")).await.unwrap();
        let html = text_response(response).await;
        for soil in ["sandy", "clay", "loamy"] {
            assert!(html.contains(&format!("value=\"{}\"", soil)));
        }
    }

    #[tokio::test]
    async fn test_static_files_served() {
        let models = common::model_dir();
        let static_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(static_dir.path().join("css")).unwrap();
        std::fs::write(static_dir.path().join("css/site.css"), "body { margin: 0; }").unwrap();

        let app = create_router(AppState::new(models.path(), static_dir.path()));
        let response = app.oneshot(get("/static/css/site.css")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text_response(response).await, "body { margin: 0; }");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (app, _dir) = create_app_without_models();
        let response = app.oneshot(get("/no-such-page")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // =========================================================================
    // Section 5: Forms
    // =========================================================================

    #[tokio::test]
    async fn test_submit_recommendation_redirects() {
        let (app, _dir) = create_app_without_models();

        let response = app
            .oneshot(post_form(
                "/submit-recommendation",
                "location=Nashik&lastCrop=onion&irrigation=drip",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/crop-analysis");
    }

    #[tokio::test]
    async fn test_submit_recommendation_unreadable_form() {
        let (app, _dir) = create_app_without_models();

        let response = app
            .oneshot(post_json("/submit-recommendation", "{}".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = text_response(response).await;
        assert!(html.contains("alert-error"));
    }

    #[tokio::test]
    async fn test_submit_contact() {
        let (app, _dir) = create_app_without_models();

        let response = app
            .oneshot(post_form(
                "/submit-contact",
                "name=Asha&email=asha%40example.com&message=When+to+sow+jute%3F",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = text_response(response).await;
        assert!(html.contains("Message sent successfully!"));
    }

    #[tokio::test]
    async fn test_submit_contact_unreadable_form() {
        let (app, _dir) = create_app_without_models();

        let response = app
            .oneshot(post_json("/submit-contact", "{}".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = text_response(response).await;
        assert!(html.contains("Failed to send message."));
    }

    #[test]
    fn test_state_from_missing_directory() {
        let state = AppState::new(Path::new("/nonexistent/avani/models"), Path::new("static"));
        assert!(!state.models_loaded());
    }
}
