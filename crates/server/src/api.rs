//! HTTP API for the heart disease prediction service
//!
//! Exposes the prediction endpoint, a browser form, health checks, and
//! Prometheus metrics.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use predictor_lib::{
    health::{ComponentStatus, HealthRegistry},
    observability::{ServiceMetrics, StructuredLogger},
    PatientFeatures, PredictError, Prediction, SvmPredictor,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state; the predictor is read-only after load
pub struct AppState {
    pub predictor: SvmPredictor,
    pub health_registry: HealthRegistry,
    pub metrics: ServiceMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        predictor: SvmPredictor,
        health_registry: HealthRegistry,
        metrics: ServiceMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            predictor,
            health_registry,
            metrics,
            logger,
        }
    }
}

/// Service banner returned by `GET /`
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceBanner {
    pub message: String,
    pub version: String,
    pub endpoint: String,
}

/// Successful prediction response body
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: u8,
    pub confidence_score: f64,
    pub result_text: String,
    pub model_version: String,
}

impl From<Prediction> for PredictionResponse {
    fn from(p: Prediction) -> Self {
        Self {
            prediction: p.prediction,
            confidence_score: p.confidence_score,
            result_text: p.result_text,
            model_version: p.model_version,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Service banner
async fn banner() -> impl IntoResponse {
    Json(ServiceBanner {
        message: "Welcome to Heart Disease Prediction API".to_string(),
        version: SERVICE_VERSION.to_string(),
        endpoint: "/predict".to_string(),
    })
}

/// Run a prediction for a JSON patient record
async fn predict(
    State(state): State<Arc<AppState>>,
    Json(patient): Json<PatientFeatures>,
) -> impl IntoResponse {
    let start = Instant::now();

    match state.predictor.predict(&patient) {
        Ok(prediction) => {
            state
                .metrics
                .observe_prediction_latency(start.elapsed().as_secs_f64());
            state.metrics.inc_predictions();
            state.logger.log_prediction(
                "http",
                prediction.prediction,
                prediction.confidence_score,
                &prediction.model_version,
            );
            (StatusCode::OK, Json(PredictionResponse::from(prediction))).into_response()
        }
        Err(PredictError::Validation(err)) => {
            state.metrics.inc_validation_errors();
            state
                .logger
                .log_validation_rejected("http", err.field(), &err.to_string());
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: err.to_string(),
                    code: Some("validation_failed".to_string()),
                    field: Some(err.field().to_string()),
                }),
            )
                .into_response()
        }
        Err(err) => {
            state.metrics.inc_inference_errors();
            state.logger.log_inference_error("http", &err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Prediction error".to_string(),
                    code: Some("inference_failed".to_string()),
                    field: None,
                }),
            )
                .into_response()
        }
    }
}

/// Browser form for the eleven patient features
async fn form() -> impl IntoResponse {
    Html(include_str!("../assets/form.html"))
}

/// Health check - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/predict", post(predict))
        .route("/form", get(form))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
