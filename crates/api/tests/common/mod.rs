//! Shared helpers for API integration tests: test configuration, a
//! deterministic generation model, and a request driver.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use carefully_core::conversation::ConversationTurn;
use carefully_core::scoring::FeedbackRubric;
use carefully_llm::{CharacterReply, DialogueModel, LlmError};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use carefully_api::auth::jwt::{generate_access_token, JwtConfig};
use carefully_api::config::ServerConfig;
use carefully_api::locks::SessionLocks;
use carefully_api::router::build_app_router;
use carefully_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_turn_target: 3,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Deterministic [`DialogueModel`] for tests.
///
/// Every turn scores axes (80, 70, 90, 60), i.e. a 75 axis mean, so a
/// completed session of any length scores 75.
pub struct ScriptedModel;

#[async_trait]
impl DialogueModel for ScriptedModel {
    async fn generate_reply(
        &self,
        _context: &str,
        _history: &[ConversationTurn],
        message: &str,
    ) -> Result<CharacterReply, LlmError> {
        Ok(CharacterReply {
            message: format!("In reply to: {message}"),
            sentiment: "neutral".to_string(),
            should_continue: true,
        })
    }

    async fn generate_feedback(
        &self,
        _context: &str,
        _history: &[ConversationTurn],
        _message: &str,
    ) -> Result<FeedbackRubric, LlmError> {
        Ok(FeedbackRubric {
            empathy: 80,
            tone: 70,
            clarity: 90,
            decision_making: 60,
            overall_score: 75,
            summary: "Calm and clear.".to_string(),
            suggestions: vec!["Name the feeling you heard.".to_string()],
        })
    }
}

/// A [`DialogueModel`] whose calls always fail, for fail-atomicity tests.
pub struct FailingModel;

#[async_trait]
impl DialogueModel for FailingModel {
    async fn generate_reply(
        &self,
        _context: &str,
        _history: &[ConversationTurn],
        _message: &str,
    ) -> Result<CharacterReply, LlmError> {
        Err(LlmError::Api {
            status: 500,
            body: "upstream exploded".to_string(),
        })
    }

    async fn generate_feedback(
        &self,
        _context: &str,
        _history: &[ConversationTurn],
        _message: &str,
    ) -> Result<FeedbackRubric, LlmError> {
        Err(LlmError::Api {
            status: 500,
            body: "upstream exploded".to_string(),
        })
    }
}

/// Build the full application router with all middleware layers, using
/// the given pool and generation model.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool, model: Arc<dyn DialogueModel>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        model,
        session_locks: Arc::new(SessionLocks::new()),
    };
    build_app_router(state, &config)
}

/// Bearer token for a test user.
pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, "worker", &test_config().jwt).expect("token generation")
}

/// Drive one request through the router and parse the JSON response.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request build"),
        None => builder.body(Body::empty()).expect("request build"),
    };

    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response was not JSON")
    };
    (status, json)
}
