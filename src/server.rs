//! HTTP server bootstrap for the InvoiceChain ledger.
//!
//! This module wires together:
//! - configuration
//! - the submission store and service
//! - the Axum router

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::DEFAULT_ID_PREFIX;
use crate::infra::{
    InMemorySubmissionStore, InspectionService, PayloadValidator, SubmissionIdGenerator,
    SubmissionStore,
};
use crate::telemetry::{init_telemetry, TelemetryConfig};

/// Inline data-URL attachments make bodies large; 25 MiB by default.
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server listen address.
    pub listen_addr: SocketAddr,
    /// Prefix for generated submission ids.
    pub id_prefix: String,
    /// Maximum accepted request body size.
    pub max_body_bytes: usize,
    /// Allowed CORS origins; `None` allows any origin.
    pub cors_allow_origins: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors_allow_origins: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port: u16 = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {p:?}"))?,
            None => 8000,
        };

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let listen_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("Invalid listen address {host}:{port}"))?;

        let id_prefix = lookup("SUBMISSION_ID_PREFIX")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_ID_PREFIX.to_string());

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("Invalid MAX_BODY_BYTES: {v:?}"))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS").and_then(|v| {
            let v = v.trim();
            if v.is_empty() || v == "*" {
                None
            } else {
                Some(
                    v.split(',')
                        .map(|s| s.trim())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect(),
                )
            }
        });

        Ok(Self {
            listen_addr,
            id_prefix,
            max_body_bytes,
            cors_allow_origins,
        })
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InspectionService>,
}

impl AppState {
    /// State backed by `store` with the default validation rules.
    pub fn new(store: Arc<dyn SubmissionStore>, config: &Config) -> anyhow::Result<Self> {
        let ids = SubmissionIdGenerator::new(config.id_prefix.as_str())?;
        info!("  Submission id prefix: {}", ids.prefix());
        let service = InspectionService::new(store, PayloadValidator::default(), ids);
        Ok(Self {
            service: Arc::new(service),
        })
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: &Config) -> anyhow::Result<Self> {
        Self::new(Arc::new(InMemorySubmissionStore::new()), config)
    }
}

/// Start the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    init_telemetry(&TelemetryConfig::from_env())?;

    info!("Starting InvoiceChain ledger v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!("Configuration loaded");
    info!("  Listen address: {}", config.listen_addr);
    info!("  Max body bytes: {}", config.max_body_bytes);

    let state = AppState::in_memory(&config)?;
    info!("Using in-memory submission store (records do not survive restarts)");

    let app = build_router(&config)?.with_state(state);

    info!("Starting HTTP server on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;

    info!("InvoiceChain ledger is ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Build the full router: inspection routes at the root and under `/api`,
/// plus `/health`.
pub fn build_router(config: &Config) -> anyhow::Result<Router<AppState>> {
    let router = Router::new()
        .merge(crate::api::router())
        .nest("/api", crate::api::router())
        .route("/health", get(crate::api::handlers::health_check))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let allow_origin = match &config.cors_allow_origins {
        None => AllowOrigin::any(),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .map(|s| {
                    s.parse::<HeaderValue>()
                        .map_err(|e| anyhow::anyhow!("Invalid CORS origin {s:?}: {e}"))
                })
                .collect::<anyhow::Result<_>>()?;
            AllowOrigin::list(origins)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
