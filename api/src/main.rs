//! AutoMaint Reports API Server
//!
//! Turns the maintenance spreadsheet into bar chart reports and forwards the
//! chart links to an automation webhook.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{HttpWebhookNotifier, PlottersBarRenderer, SpreadsheetSource};
use app::ReportService;
use config::Config;

pub type DefaultReportService =
    ReportService<SpreadsheetSource, PlottersBarRenderer, HttpWebhookNotifier>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub report_service: Arc<DefaultReportService>,
    pub config: Config,
}

impl AppState {
    /// Wire the adapters described by `config`
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let source = Arc::new(SpreadsheetSource::new(
            config.input_path.clone(),
            config.sheet_name.clone(),
        ));
        let renderer = Arc::new(PlottersBarRenderer::new(config.chart_font_path.as_deref()));
        if !renderer.text_enabled() {
            tracing::warn!("Set CHART_FONT_PATH to draw titles and labels on charts");
        }
        let notifier = Arc::new(
            HttpWebhookNotifier::new(
                config.webhook_url.clone(),
                Duration::from_secs(config.webhook_timeout_secs),
            )
            .context("Failed to build webhook client")?,
        );

        let report_service = Arc::new(ReportService::new(
            source,
            renderer,
            notifier,
            config.report_dir.clone(),
            config.public_base_url.clone(),
        ));

        Ok(Self {
            report_service,
            config,
        })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Chart generation is expensive, so it gets its own per-peer limit
    let mut generate_routes =
        Router::new().route("/generate-charts", post(handlers::generate_charts));

    if state.config.rate_limit_enabled() {
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(state.config.rate_limit_per_second)
                .burst_size(state.config.rate_limit_burst)
                .finish()
                .context("Failed to build governor config")?,
        );
        generate_routes = generate_routes.layer(GovernorLayer {
            config: governor_config,
        });
    }

    let app = Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(health))
        .route("/report/:filename", get(handlers::get_report))
        .merge(generate_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,automaint_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AutoMaint Reports API...");

    // Load configuration
    let config = Config::from_env();
    tracing::info!(
        "Reading maintenance records from '{}'",
        config.input_path.display()
    );
    if config.webhook_url.is_none() {
        tracing::info!("WEBHOOK_URL not set, chart links will not be forwarded");
    }

    let state = AppState::from_config(config.clone())?;

    state
        .report_service
        .ensure_report_dir()
        .with_context(|| format!("Failed to create '{}'", config.report_dir.display()))?;
    tracing::info!("Ensured directory '{}' exists.", config.report_dir.display());

    let app = build_router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
