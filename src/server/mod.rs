//! HTTP surface: dashboard page, snapshot endpoint and health check.
//!
//! Every handler is stateless. The router only carries a factory that builds
//! a fresh provider per `/api/system` request, so concurrent requests each
//! run their own CPU sample.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse, Json},
    routing::get,
};
use chrono::{Local, SecondsFormat};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::system::{Collector, HostProvider, MetricsProvider, SnapshotResponse};

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const DASHBOARD_JS: &str = include_str!("../../assets/dashboard.js");

/// Builds the provider used for one collection.
pub type ProviderFactory = Arc<dyn Fn() -> Box<dyn MetricsProvider + Send> + Send + Sync>;

#[derive(Clone)]
struct AppState {
    provider: ProviderFactory,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn handle_dashboard_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}

async fn handle_system(State(state): State<AppState>) -> Json<SnapshotResponse> {
    let factory = Arc::clone(&state.provider);
    let joined = tokio::task::spawn_blocking(move || Collector::new(factory()).collect()).await;

    let response = match joined {
        Ok(result) => {
            if let Err(err) = &result {
                tracing::warn!(error = %err, "system collection failed");
            }
            SnapshotResponse::from(result)
        }
        Err(err) => {
            tracing::error!(error = %err, "collection task did not complete");
            SnapshotResponse::error(format!("collection task failed: {err}"))
        }
    };
    Json(response)
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}

/// Router over the host's real counters.
pub fn build_router() -> Router {
    build_router_with(Arc::new(|| {
        Box::new(HostProvider::new()) as Box<dyn MetricsProvider + Send>
    }))
}

pub fn build_router_with(provider: ProviderFactory) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/api/system", get(handle_system))
        .route("/api/health", get(handle_health))
        .route("/static/js/dashboard.js", get(handle_dashboard_js))
        .with_state(AppState { provider })
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl+C.
pub async fn run_server(config: &ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, build_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
