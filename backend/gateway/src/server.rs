//! Main HTTP Gateway Server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use instafeed_config::Config;

use crate::feed_api;
use crate::health_api;
use crate::upstream::{GraphApi, HttpGraphApi};

/// Application state shared across routes.
///
/// Immutable per process; each request reads what it needs and shares nothing else.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<Config>,
    pub graph: Arc<dyn GraphApi>,
}

impl GatewayState {
    pub fn new(config: Config, graph: Arc<dyn GraphApi>) -> Self {
        Self {
            config: Arc::new(config),
            graph,
        }
    }

    /// State backed by the real Instagram Graph API.
    pub fn from_config(config: Config) -> Self {
        Self::new(config, Arc::new(HttpGraphApi::new()))
    }
}

/// Build the Axum router with all API routes.
pub fn build_router(state: GatewayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/instagram", get(feed_api::get_feed))
        .route("/api/health", get(health_api::get_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server and serves until Ctrl-C or SIGTERM.
#[instrument(skip(state))]
pub async fn start_server(addr: &str, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gateway HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

/// Resolves on the first of Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGraphApi;

    async fn serve(state: GatewayState) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_cross_origin_get_is_allowed() {
        let state = GatewayState::new(Config::default(), Arc::new(MockGraphApi::new()));
        let base = serve(state).await;

        let response = reqwest::Client::new()
            .get(format!("{base}/api/health"))
            .header("Origin", "http://localhost:5173")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_preflight_allows_get() {
        let state = GatewayState::new(Config::default(), Arc::new(MockGraphApi::new()));
        let base = serve(state).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{base}/api/instagram"))
            .header("Origin", "http://localhost:5173")
            .header("Access-Control-Request-Method", "GET")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let allowed = response
            .headers()
            .get("access-control-allow-methods")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(allowed.contains("GET"));
    }
}
