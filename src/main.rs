//! Salary Prediction API Server
//!
//! Serves three exported models (regression, classification, clustering)
//! behind a shared preprocessor.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  SALARY PREDICTION API                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  POST /predict/salary                                       │
//! │        │                                                    │
//! │        ▼                                                    │
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────┐ │
//! │  │ Normalize │─▶│ Preprocessor │─▶│ Regression           │ │
//! │  │ (features)│  │ (estimators) │  │  ├─▶ Classification  │ │
//! │  └───────────┘  └──────────────┘  │  └─▶ Clustering      │ │
//! │                                   └──────────────────────┘ │
//! │                ┌──────────────────┐                         │
//! │                │ models/*.json    │  loaded once at startup │
//! │                └──────────────────┘                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod artifacts;
mod config;
mod error;
mod estimators;
mod features;
mod handlers;
mod middleware;
mod models;
mod pipeline;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use artifacts::ModelArtifacts;
pub use error::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env();

    // Initialize tracing (RUST_LOG / LOG_FORMAT may come from .env)
    init_tracing(&config);

    tracing::info!("Salary Prediction API starting...");

    // Models are loaded before the listener binds
    let artifacts = ModelArtifacts::load(&config.models_dir);

    let state = AppState {
        artifacts: Arc::new(artifacts),
    };

    let app = create_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn init_tracing(config: &config::Config) {
    let default_filter = if config.is_production() {
        "salary_predictor=info,tower_http=info"
    } else {
        "salary_predictor=debug,tower_http=debug"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ModelArtifacts>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::home))
        .route("/health", get(handlers::health::check))
        .route("/predict/salary", post(handlers::predict::salary))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        // any origin, with credentials: origin/methods/headers are echoed back
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        )
        .with_state(state)
}
