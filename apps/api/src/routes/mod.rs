pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::blog::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found() -> Result<(), AppError> {
    Err(AppError::NotFound("no such route".to_string()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Blog API
        .route("/api/v1/blog/generate", post(handlers::handle_generate))
        .route("/api/v1/blog/edit", post(handlers::handle_edit))
        .route(
            "/api/v1/blog/references/validate",
            post(handlers::handle_validate_references),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::test_support::{research, StubPhotoSource, StubResearchSource, StubTextModel};
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const MODEL_OUTPUT: &str = "# Solar Energy Basics\n\nSunlight becomes power.\n\n## Panels\nCells convert light.";

    fn config() -> Config {
        Config {
            anthropic_api_key: "test-key".to_string(),
            news_api_key: None,
            serp_api_key: None,
            unsplash_access_key: None,
            unsplash_app_name: "blogsmith".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn state(llm: Arc<StubTextModel>) -> AppState {
        AppState {
            config: config(),
            llm,
            news: StubResearchSource::new(
                "news",
                vec![research(
                    "Solar energy prices keep falling",
                    "https://news.example.com/solar",
                    "Solar energy is now cheaper than coal in most markets.",
                    "Example News",
                )],
            ),
            web: StubResearchSource::new("web", vec![]),
            photos: StubPhotoSource::new(vec![]),
        }
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(state(StubTextModel::replying(MODEL_OUTPUT)));
        let (status, body) = send(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "blogsmith-api");
    }

    #[tokio::test]
    async fn test_generate_returns_full_result() {
        let app = build_router(state(StubTextModel::replying(MODEL_OUTPUT)));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/blog/generate",
            Some(json!({"topic": "solar energy", "tone": "casual", "max_words": 500})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Solar Energy Basics");
        assert_eq!(body["images"], json!([]));
        assert_eq!(body["references"][0]["url"], "https://news.example.com/solar");
        assert_eq!(body["metadata"]["references_count"], 1);
        assert!(body["content"].as_str().unwrap().contains("## References"));
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_topic() {
        let llm = StubTextModel::replying(MODEL_OUTPUT);
        let app = build_router(state(llm.clone()));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/blog/generate",
            Some(json!({"topic": "  ", "max_words": 500})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_missing_field_uses_error_envelope() {
        let llm = StubTextModel::replying(MODEL_OUTPUT);
        let app = build_router(state(llm.clone()));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/blog/generate",
            Some(json!({"topic": "solar"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("max_words"));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_tone_uses_error_envelope() {
        let app = build_router(state(StubTextModel::replying(MODEL_OUTPUT)));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/blog/generate",
            Some(json!({"topic": "solar", "tone": "sarcastic", "max_words": 500})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_edit_malformed_json_uses_error_envelope() {
        let app = build_router(state(StubTextModel::replying(MODEL_OUTPUT)));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/blog/edit")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_rejects_word_budget_out_of_range() {
        let app = build_router(state(StubTextModel::replying(MODEL_OUTPUT)));
        let (status, _) = send(
            app,
            "POST",
            "/api/v1/blog/generate",
            Some(json!({"topic": "solar energy", "max_words": 20000})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_failure_reports_generation_error() {
        let app = build_router(state(StubTextModel::failing("overloaded")));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/blog/generate",
            Some(json!({"topic": "solar energy", "max_words": 500})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "GENERATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Blog generation failed:"));
    }

    #[tokio::test]
    async fn test_edit_returns_revised_post() {
        let llm = StubTextModel::replying("# Shorter Title\n\nTighter body.");
        let app = build_router(state(llm.clone()));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/blog/edit",
            Some(json!({"content": "# Long Title\n\nWordy body.", "edit_request": "Make it shorter"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Shorter Title");
        assert_eq!(body["content"], "Tighter body.");
        assert!(llm.last_prompt().unwrap().contains("Make it shorter"));
    }

    #[tokio::test]
    async fn test_edit_rejects_blank_request() {
        let app = build_router(state(StubTextModel::replying(MODEL_OUTPUT)));
        let (status, _) = send(
            app,
            "POST",
            "/api/v1/blog/edit",
            Some(json!({"content": "# T\n\nBody", "edit_request": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validate_references_reports_issues() {
        let app = build_router(state(StubTextModel::replying(MODEL_OUTPUT)));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/blog/references/validate",
            Some(json!({"references": [
                {"title": "", "url": "not a url", "source": "X", "published_at": null}
            ]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_valid"], false);
        assert_eq!(body["issues"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = build_router(state(StubTextModel::replying(MODEL_OUTPUT)));
        let (status, body) = send(app, "GET", "/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
