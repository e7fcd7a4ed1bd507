use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use steeple_api::auth::jwt::{generate_access_token, JwtConfig};
use steeple_api::config::ServerConfig;
use steeple_api::routes;
use steeple_api::state::AppState;
use steeple_engine::event::EventBus;
use steeple_engine::push::{BatchResponse, OutboundMessage, PushClient, PushError};
use steeple_engine::{EngineContext, WebhookNotifier};
use steeple_store::{MemoryStore, Stores};

/// Push client that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingClient {
    pub sent: Mutex<Vec<OutboundMessage>>,
}

#[async_trait]
impl PushClient for RecordingClient {
    async fn send(&self, message: &OutboundMessage) -> Result<(), PushError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn send_each(&self, messages: &[OutboundMessage]) -> Result<BatchResponse, PushError> {
        self.sent.lock().unwrap().extend_from_slice(messages);
        Ok(BatchResponse {
            responses: messages.iter().map(|_| Ok(())).collect(),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        slack_webhook_url: None,
        quiet_hours_utc_offset: 9,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Mint a bearer token for `user_id` signed with the test secret.
pub fn token_for(user_id: &str) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

/// Build the full application router with all middleware layers over a fresh
/// in-memory store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. Returns the store and push-client
/// handles for seeding and assertions.
pub fn build_test_app() -> (Router, Arc<MemoryStore>, Arc<RecordingClient>) {
    let config = test_config();
    let (stores, store) = Stores::memory();
    let client = Arc::new(RecordingClient::default());
    let engine = EngineContext::new(
        stores,
        client.clone(),
        Arc::new(WebhookNotifier::new(None)),
    );

    let state = AppState {
        engine,
        config: Arc::new(config),
        event_bus: Arc::new(EventBus::default()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    (app, store, client)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a JSON POST request with an optional bearer token.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
