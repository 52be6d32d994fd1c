//! Heart Disease Prediction API server
//!
//! Loads the pre-trained SVM model and pre-fitted scaler at startup and
//! serves predictions over HTTP.

use anyhow::{Context, Result};
use predictor_lib::{
    health::{components, HealthRegistry},
    observability::{ServiceMetrics, StructuredLogger},
    SvmPredictor,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting heart-predictor");

    let config = config::ServerConfig::load()?;
    info!(
        model_path = %config.model_path,
        scaler_path = %config.scaler_path,
        "Server configured"
    );

    let logger = StructuredLogger::new("heart-predictor");

    let predictor = SvmPredictor::load(
        Path::new(&config.scaler_path),
        Path::new(&config.model_path),
        config.scaler_sha256.as_deref(),
        config.model_sha256.as_deref(),
    )
    .inspect_err(|_| logger.log_model_loaded("unknown", "unknown", false))
    .context("Failed to load model artifacts")?;

    let model_version = predictor.model_version().to_string();
    let kernel = predictor.kernel_name();
    logger.log_model_loaded(&model_version, kernel, true);

    let health_registry = HealthRegistry::new();
    health_registry.register(components::MODEL).await;
    health_registry.register(components::API).await;

    let metrics = ServiceMetrics::new();
    metrics.set_model_version(&model_version, kernel);

    logger.log_startup(SERVICE_VERSION, &model_version);

    let app_state = Arc::new(api::AppState::new(
        predictor,
        health_registry.clone(),
        metrics.clone(),
        logger.clone(),
    ));

    // Mark service as ready after the model is loaded
    health_registry.set_ready(true).await;

    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");
    api_handle.abort();

    Ok(())
}
