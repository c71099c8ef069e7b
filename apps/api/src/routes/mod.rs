pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::optimizer::handlers as optimizer;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Prompt analysis
        .route("/api/prompts/analyze", post(optimizer::handle_analyze))
        .route("/api/prompts/variations", post(optimizer::handle_variations))
        .route("/api/prompts/:id", get(optimizer::handle_get_prompt))
        .route(
            "/api/suggestions/:id/apply",
            post(optimizer::handle_apply_suggestion),
        )
        // Template library
        .route("/api/templates", get(templates::handle_list_templates))
        .route("/api/templates/:id/use", post(templates::handle_use_template))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::store::{MemoryStore, Storage};

    const CRITIQUE_REPLY: &str = r#"{
        "score": 58,
        "suggestions": [
            {"type": "specificity", "title": "Set a length", "description": "Give a word count.", "impact": "high", "points": 15},
            {"type": "context", "title": "Name the audience", "description": "Say who will read it.", "impact": "medium", "points": 10}
        ],
        "optimizedContent": "Write a 500-word adventure story for young readers.",
        "wordCount": 3,
        "characterCount": 13,
        "clarity": "Fair"
    }"#;

    struct TestApp {
        router: Router,
        store: Arc<MemoryStore>,
        llm: Arc<ScriptedBackend>,
    }

    fn test_app_with(llm: ScriptedBackend, config: Config) -> TestApp {
        let store = Arc::new(MemoryStore::new());
        let llm = Arc::new(llm);
        let state = AppState {
            store: store.clone(),
            llm: llm.clone(),
            config,
        };
        TestApp {
            router: build_router(state),
            store,
            llm,
        }
    }

    fn test_app(llm: ScriptedBackend) -> TestApp {
        test_app_with(llm, Config::default())
    }

    async fn send(router: &Router, request: Request<Body>) -> Response {
        router.clone().oneshot(request).await.unwrap()
    }

    async fn get(router: &Router, uri: &str) -> Response {
        send(router, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(router: &Router, uri: &str, body: Value) -> Response {
        send(
            router,
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn post_empty(router: &Router, uri: &str) -> Response {
        send(router, Request::post(uri).body(Body::empty()).unwrap()).await
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ── Analyze / fetch ────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_analyze_then_fetch_round_trip() {
        let app = test_app(ScriptedBackend::ok(CRITIQUE_REPLY));

        let response = post_json(
            &app.router,
            "/api/prompts/analyze",
            json!({"content": "Write a story", "type": "creative"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        let prompt_id = body["promptId"].as_i64().unwrap();
        assert!(prompt_id > 0);
        let score = body["analysis"]["score"].as_i64().unwrap();
        assert!((0..=100).contains(&score));
        let suggestion_count = body["analysis"]["suggestions"].as_array().unwrap().len();
        assert_eq!(suggestion_count, 2);

        let response = get(&app.router, &format!("/api/prompts/{prompt_id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let detail = body_json(response).await;
        assert_eq!(detail["prompt"]["content"], "Write a story");
        assert_eq!(detail["prompt"]["type"], "creative");
        assert_eq!(detail["prompt"]["score"], 58);
        assert_eq!(
            detail["prompt"]["optimizedContent"],
            "Write a 500-word adventure story for young readers."
        );
        let suggestions = detail["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), suggestion_count);
        assert!(suggestions.iter().all(|s| s["promptId"] == prompt_id));
        assert!(suggestions.iter().all(|s| s["applied"] == false));
    }

    #[tokio::test]
    async fn test_analyze_defaults_type_to_creative() {
        let app = test_app(ScriptedBackend::ok(CRITIQUE_REPLY));
        let body = body_json(
            post_json(
                &app.router,
                "/api/prompts/analyze",
                json!({"content": "Write a story"}),
            )
            .await,
        )
        .await;

        let id = body["promptId"].as_i64().unwrap();
        let prompt = app.store.get_prompt(id).await.unwrap().unwrap();
        assert_eq!(prompt.kind.as_str(), "creative");
        let seen = app.llm.seen.lock().unwrap();
        assert!(seen[0].1.contains("Consider the prompt type: creative."));
    }

    #[tokio::test]
    async fn test_analyze_persists_fallback_when_model_fails() {
        let app = test_app(ScriptedBackend::failing());

        let response = post_json(
            &app.router,
            "/api/prompts/analyze",
            json!({"content": "Write a story", "type": "instructional"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["analysis"]["score"], 20);
        assert_eq!(body["analysis"]["clarity"], "Fair");
        assert_eq!(body["analysis"]["suggestions"][0]["type"], "specificity");

        let id = body["promptId"].as_i64().unwrap();
        let stored = app.store.suggestions_for_prompt(id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Add More Details");
    }

    #[tokio::test]
    async fn test_analyze_without_content_is_400() {
        let app = test_app(ScriptedBackend::ok(CRITIQUE_REPLY));
        let response = post_json(&app.router, "/api/prompts/analyze", json!({})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(app.llm.seen.lock().unwrap().is_empty());
        assert!(app.store.list_prompts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_payloads() {
        let app = test_app(ScriptedBackend::ok(CRITIQUE_REPLY));
        for payload in [
            json!({"content": 42}),
            json!({"content": "   "}),
            json!({"content": "Write a story", "type": "poetic"}),
        ] {
            let response = post_json(&app.router, "/api/prompts/analyze", payload.clone()).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
        }

        let response = post_empty(&app.router, "/api/prompts/analyze").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fetch_unknown_prompt_is_404() {
        let app = test_app(ScriptedBackend::default());
        let response = get(&app.router, "/api/prompts/999").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_non_numeric_ids_behave_like_unknown_ids() {
        let app = test_app(ScriptedBackend::default());
        let before = app.store.list_templates().await.unwrap();

        let response = get(&app.router, "/api/prompts/latest").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");

        let response = post_empty(&app.router, "/api/suggestions/abc/apply").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = post_empty(&app.router, "/api/templates/abc/use").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true}));
        assert_eq!(app.store.list_templates().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_analyze_treats_empty_type_as_creative() {
        let app = test_app(ScriptedBackend::ok(CRITIQUE_REPLY));
        let response = post_json(
            &app.router,
            "/api/prompts/analyze",
            json!({"content": "Write a story", "type": ""}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let id = body_json(response).await["promptId"].as_i64().unwrap();
        let prompt = app.store.get_prompt(id).await.unwrap().unwrap();
        assert_eq!(prompt.kind.as_str(), "creative");
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let app = test_app(ScriptedBackend::default());
        let content = "a".repeat(2_400_000);
        let response = post_json(
            &app.router,
            "/api/prompts/analyze",
            json!({"content": content}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(app.llm.seen.lock().unwrap().is_empty());
    }

    // ── Suggestions ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_apply_suggestion_is_idempotent() {
        let app = test_app(ScriptedBackend::ok(CRITIQUE_REPLY));
        let body = body_json(
            post_json(
                &app.router,
                "/api/prompts/analyze",
                json!({"content": "Write a story"}),
            )
            .await,
        )
        .await;
        let prompt_id = body["promptId"].as_i64().unwrap();
        let suggestion_id = app.store.suggestions_for_prompt(prompt_id).await.unwrap()[0].id;

        for _ in 0..2 {
            let response = post_empty(
                &app.router,
                &format!("/api/suggestions/{suggestion_id}/apply"),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["suggestion"]["applied"], true);
            assert_eq!(body["suggestion"]["id"], suggestion_id);
        }
    }

    #[tokio::test]
    async fn test_apply_unknown_suggestion_is_404() {
        let app = test_app(ScriptedBackend::default());
        let response = post_empty(&app.router, "/api/suggestions/31/apply").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ── Variations ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_variations_default_count() {
        let app = test_app(ScriptedBackend::ok(
            r#"{"variations": ["Tell a story", "Compose a tale", "Narrate an adventure"]}"#,
        ));
        let response = post_json(
            &app.router,
            "/api/prompts/variations",
            json!({"content": "Write a story"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["variations"].as_array().unwrap().len(), 3);
        assert!(app.llm.seen.lock().unwrap()[0]
            .1
            .starts_with("Generate 3 different variations"));
    }

    #[tokio::test]
    async fn test_variations_count_clamped_to_configured_max() {
        let config = Config {
            max_variations: 2,
            ..Config::default()
        };
        let app = test_app_with(ScriptedBackend::ok(r#"{"variations": ["a", "b", "c"]}"#), config);
        let body = body_json(
            post_json(
                &app.router,
                "/api/prompts/variations",
                json!({"content": "Write a story", "count": 10}),
            )
            .await,
        )
        .await;
        assert_eq!(body["variations"], json!(["a", "b"]));
        assert!(app.llm.seen.lock().unwrap()[0]
            .1
            .starts_with("Generate 2 different variations"));
    }

    #[tokio::test]
    async fn test_variations_fall_back_to_original() {
        let app = test_app(ScriptedBackend::failing());
        let body = body_json(
            post_json(
                &app.router,
                "/api/prompts/variations",
                json!({"content": "Write a story", "count": 4}),
            )
            .await,
        )
        .await;
        assert_eq!(body["variations"], json!(["Write a story"]));
    }

    #[tokio::test]
    async fn test_variations_without_content_is_400() {
        let app = test_app(ScriptedBackend::default());
        for payload in [json!({"count": 2}), json!({"content": ["a"]}), json!({"content": "x", "count": -1})] {
            let response = post_json(&app.router, "/api/prompts/variations", payload.clone()).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
        }
    }

    // ── Templates ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fresh_store_lists_three_templates() {
        let app = test_app(ScriptedBackend::default());
        let body = body_json(get(&app.router, "/api/templates").await).await;
        let categories: Vec<&str> = body["templates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories, vec!["creative", "analytical", "educational"]);
    }

    #[tokio::test]
    async fn test_templates_filtered_by_category() {
        let app = test_app(ScriptedBackend::default());

        let body = body_json(get(&app.router, "/api/templates?category=educational").await).await;
        let templates = body["templates"].as_array().unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0]["name"], "Learning Coach");

        let body = body_json(get(&app.router, "/api/templates?category=legal").await).await;
        assert!(body["templates"].as_array().unwrap().is_empty());

        let body = body_json(get(&app.router, "/api/templates?category=").await).await;
        assert_eq!(body["templates"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_template_query_uses_error_body() {
        let app = test_app(ScriptedBackend::default());
        let response = get(&app.router, "/api/templates?category=creative&category=analytical").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_use_template_increments_by_one() {
        let app = test_app(ScriptedBackend::default());
        let response = post_empty(&app.router, "/api/templates/1/use").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true}));
        assert_eq!(app.store.get_template(1).await.unwrap().unwrap().usage_count, 125);
    }

    #[tokio::test]
    async fn test_use_unknown_template_still_succeeds() {
        let app = test_app(ScriptedBackend::default());
        let before = app.store.list_templates().await.unwrap();

        let response = post_empty(&app.router, "/api/templates/404/use").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);
        assert_eq!(app.store.list_templates().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_health_reports_storage_backend() {
        let app = test_app(ScriptedBackend::default());
        let body = body_json(get(&app.router, "/health").await).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }
}
