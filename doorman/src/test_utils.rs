//! Test utilities for integration testing.
//!
//! The centerpiece is [`spawn_mock_provider`], an in-process stand-in for
//! the remote chat-completions API. It records every request it receives so
//! tests can assert exact provider-call counts and inspect the payload the
//! client actually sent.

use std::net::SocketAddr;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_test::TestServer;
use serde_json::{Value, json};

use crate::config::{Config, ProviderConfig};

/// What the mock provider should answer with.
pub enum MockResponse {
    /// 200 with a well-formed completion wrapping the given content string
    Success(String),
    /// The given status with a plain body
    Status(u16, String),
    /// 200 with the given body verbatim
    Raw(String),
}

#[derive(Clone)]
struct MockProviderState {
    response: Arc<MockResponse>,
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

/// Handle onto a running mock provider.
pub struct MockProvider {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

impl MockProvider {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of completion requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// The most recent request body, if any request arrived.
    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }
}

async fn chat_completions(State(state): State<MockProviderState>, Json(body): Json<Value>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_body.lock().unwrap() = Some(body);

    match state.response.as_ref() {
        MockResponse::Success(content) => Json(json!({
            "choices": [{ "message": { "content": content } }]
        }))
        .into_response(),
        MockResponse::Status(code, body) => (
            StatusCode::from_u16(*code).expect("valid mock status code"),
            body.clone(),
        )
            .into_response(),
        MockResponse::Raw(body) => ([(axum::http::header::CONTENT_TYPE, "application/json")], body.clone()).into_response(),
    }
}

/// Spawn a mock provider on an ephemeral localhost port.
pub async fn spawn_mock_provider(response: MockResponse) -> MockProvider {
    let hits = Arc::new(AtomicUsize::new(0));
    let last_body = Arc::new(Mutex::new(None));

    let state = MockProviderState {
        response: Arc::new(response),
        hits: hits.clone(),
        last_body: last_body.clone(),
    };
    let router = Router::new().route("/chat/completions", post(chat_completions)).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock provider");
    let addr = listener.local_addr().expect("Mock provider has a local address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock provider stopped");
    });

    MockProvider { addr, hits, last_body }
}

pub fn test_provider_config(mock: &MockProvider) -> ProviderConfig {
    ProviderConfig {
        api_key: "sk-test".to_string(),
        base_url: mock.base_url().parse().unwrap(),
        model: "screening-model".to_string(),
        ..Default::default()
    }
}

pub fn test_config(mock: &MockProvider) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        access_token: "test-access-token".to_string(),
        provider: test_provider_config(mock),
        ..Default::default()
    }
}

pub async fn create_test_app(config: Config) -> TestServer {
    crate::Application::new(config)
        .expect("Failed to create application")
        .into_test_server()
}
