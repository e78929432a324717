//! Laptop Catalog Service
//!
//! gRPC create/search API over the in-memory laptop store, plus a small
//! HTTP router for health checks and Prometheus metrics.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context};
use axum::{routing::get, Router};
use laptop_store::{InMemoryLaptopStore, LaptopStore};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod grpc;
mod routes;

use config::{CatalogConfig, LoggingConfig};
use grpc::LaptopServiceImpl;

/// State shared by the gRPC service and the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Laptop store
    pub store: Arc<dyn LaptopStore>,
    pub config: Arc<CatalogConfig>,
    /// Prometheus handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        store: Arc<dyn LaptopStore>,
        config: CatalogConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            store,
            config: Arc::new(config),
            metrics,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }
}

/// Create the HTTP router for health and metrics
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(routes::health::health_handler))
        .route("/metrics", get(routes::prometheus::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(config.max_level()?)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| anyhow!("Failed to set tracing subscriber: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Resolve a `host:port` listen address, accepting hostnames as well as IPs
pub async fn resolve_addr(addr: &str) -> anyhow::Result<SocketAddr> {
    tokio::net::lookup_host(addr)
        .await
        .with_context(|| format!("cannot resolve listen address {}", addr))?
        .next()
        .ok_or_else(|| anyhow!("listen address {} resolved to nothing", addr))
}

/// Run the gRPC and HTTP servers until Ctrl-C
pub async fn run_server(config: CatalogConfig) -> anyhow::Result<()> {
    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics recorder not installed: {}", e);
            None
        }
    };

    let store: Arc<dyn LaptopStore> = Arc::new(InMemoryLaptopStore::new());
    let state = AppState::new(store, config, metrics);

    let grpc_addr = resolve_addr(&state.config.server.grpc_addr()).await?;
    let http_addr = resolve_addr(&state.config.server.http_addr()).await?;
    let http_listener = tokio::net::TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("cannot bind HTTP listener on {}", http_addr))?;

    let app = create_router(state.clone());
    let service = LaptopServiceImpl::new(state).into_server();

    info!("Starting gRPC server on {}", grpc_addr);
    info!("Starting HTTP server on {}", http_addr);

    let http = async {
        axum::serve(http_listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")
    };
    let grpc = async {
        Server::builder()
            .add_service(service)
            .serve_with_shutdown(grpc_addr, shutdown_signal())
            .await
            .context("gRPC server failed")
    };

    tokio::try_join!(http, grpc)?;
    info!("Servers stopped");
    Ok(())
}
