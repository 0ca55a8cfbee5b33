//! Router assembly and server lifecycle.
//!
//! Builds the axum router from the route modules, wraps it in the
//! middleware stack (CORS, tracing, timeout, body limit), and runs the
//! HTTP server with graceful shutdown on ctrl-c.

use crate::auth::Credentials;
use crate::config::{CorsConfig, GatewayConfig};
use crate::error::GatewayError;
use crate::routes;
use axum::http::{header, Method};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use sv_platforms::PlatformRegistry;
use sv_store::SocialStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    /// Persistence layer.
    pub store: SocialStore,
    /// Simulated cross-platform publishers.
    pub platforms: PlatformRegistry,
    /// Login credential material.
    pub credentials: Arc<Credentials>,
    /// Gateway configuration (limits, treasury wallet).
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(store: SocialStore, credentials: Credentials, config: GatewayConfig) -> Self {
        Self {
            store,
            platforms: PlatformRegistry::new(),
            credentials: Arc::new(credentials),
            config: Arc::new(config),
        }
    }
}

/// Build the full application router with middleware applied.
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes::api_router())
        .layer(RequestBodyLimitLayer::new(config.limits.max_request_size))
        .layer(TimeoutLayer::new(config.timeouts.request))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.cors))
        .with_state(state)
}

/// Create the CORS layer from gateway config.
fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}

/// Bind the listener and serve until ctrl-c.
pub async fn serve(state: AppState) -> Result<(), GatewayError> {
    let config = Arc::clone(&state.config);
    config.validate()?;

    let addr = config.http_addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;
    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GatewayError::Serve(e.to_string()))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Health check endpoint.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "socialverse-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
