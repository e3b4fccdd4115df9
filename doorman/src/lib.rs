//! # doorman: Compliance Screening Gateway
//!
//! `doorman` is a thin HTTP gateway that forwards uploaded profile photos or
//! "reason for calling" text to a vision/language model provider and relays
//! the model's structured compliance verdict to the caller. It exists so
//! that an application can moderation-check user content without holding
//! provider credentials itself.
//!
//! ## Overview
//!
//! The service accepts three input shapes - a multipart image upload, a JSON
//! list of pre-encoded base64 images, and a free-text form field - and
//! normalizes each into the provider's chat-message format with a fixed
//! policy prompt. A single synchronous request goes to the provider's
//! chat-completions endpoint, carrying a structured-output schema
//! (`{status: boolean, violation_reason: string}`) and sampling parameters
//! pinned for deterministic verdicts. Whatever comes back - the raw verdict
//! string or a failure - is wrapped in a uniform `{"response": ...}` /
//! `{"error": ...}` envelope and returned with HTTP 200.
//!
//! Callers authenticate with a single shared-secret access token, checked
//! before any provider work so unauthenticated requests cost nothing. There
//! is deliberately no retry logic, no caching, no queueing and no
//! persistence: each request is independent and the only state is the
//! read-only configuration loaded at startup.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use doorman::{Application, Config, telemetry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = doorman::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config)?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod openapi;
pub mod screening;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use bon::Builder;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;
use config::CorsOrigin;
use screening::ScreeningClient;

/// Application state shared across all request handlers.
///
/// Holds the read-only configuration and the screening client (a reqwest
/// connection pool plus the fixed provider parameters). Nothing in here is
/// mutated after startup, so concurrent requests never contend.
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub screening: ScreeningClient,
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    // A wildcard cannot appear in an origin list, it replaces it
    if config.cors.allowed_origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard)) {
        return Ok(CorsLayer::new().allow_origin(Any));
    }

    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        if let CorsOrigin::Url(url) = origin {
            origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
        }
    }

    Ok(CorsLayer::new().allow_origin(origins))
}

/// Build the application router with all endpoints and middleware.
///
/// This constructs the complete Axum router with:
/// - The manual upload form at `/`
/// - The three analyze endpoints
/// - Interactive API docs at `/docs`
/// - CORS configuration
/// - Tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/", get(api::handlers::pages::upload_form))
        .route("/analyze", post(api::handlers::analyze::analyze_photo))
        .route("/analyze-json", post(api::handlers::analyze::analyze_photo_batch))
        .route("/analyze_text", post(api::handlers::analyze::analyze_text))
        .with_state(state)
        .merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi()))
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// Main application struct that owns the router and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] builds the screening client, state and
///    router from a loaded configuration
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create a new application instance from a loaded configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let screening = ScreeningClient::new(config.provider.clone());
        let state = AppState::builder().config(config.clone()).screening(screening).build();
        let router = build_router(state)?;

        Ok(Self { router, config })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "doorman listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        Ok(())
    }
}
