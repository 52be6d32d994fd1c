//! Observability infrastructure for the prediction service
//!
//! Provides:
//! - Prometheus metrics (prediction latency, prediction counts, error counts,
//!   model version info)
//! - Structured JSON event logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, GaugeVec, Histogram, IntCounter,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    prediction_latency_seconds: Histogram,
    predictions_total: IntCounter,
    validation_errors_total: IntCounter,
    inference_errors_total: IntCounter,
    model_version_info: GaugeVec,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "heart_predictor_prediction_latency_seconds",
                "Time spent running scaler and SVM inference",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_total: register_int_counter!(
                "heart_predictor_predictions_total",
                "Total number of predictions served"
            )
            .expect("Failed to register predictions_total"),

            validation_errors_total: register_int_counter!(
                "heart_predictor_validation_errors_total",
                "Total number of requests rejected by input validation"
            )
            .expect("Failed to register validation_errors_total"),

            inference_errors_total: register_int_counter!(
                "heart_predictor_inference_errors_total",
                "Total number of unexpected inference failures"
            )
            .expect("Failed to register inference_errors_total"),

            model_version_info: register_gauge_vec!(
                "heart_predictor_model_version_info",
                "Information about the currently loaded SVM model",
                &["version", "kernel"]
            )
            .expect("Failed to register model_version_info"),
        }
    }
}

/// Service metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the same
/// underlying metrics.
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    /// Create a metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner()
            .prediction_latency_seconds
            .observe(duration_secs);
    }

    pub fn inc_predictions(&self) {
        self.inner().predictions_total.inc();
    }

    pub fn inc_validation_errors(&self) {
        self.inner().validation_errors_total.inc();
    }

    pub fn inc_inference_errors(&self) {
        self.inner().inference_errors_total.inc();
    }

    /// Update model version info, clearing any previous version label
    pub fn set_model_version(&self, version: &str, kernel: &str) {
        self.inner().model_version_info.reset();
        self.inner()
            .model_version_info
            .with_label_values(&[version, kernel])
            .set(1.0);
    }
}

/// Structured logger for service events
///
/// Consistent JSON-formatted logging for predictions, rejections, and
/// lifecycle events, keyed by the surface that produced them.
#[derive(Clone)]
pub struct StructuredLogger {
    service: String,
}

impl StructuredLogger {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Log a served prediction
    pub fn log_prediction(
        &self,
        surface: &str,
        label: u8,
        confidence: f64,
        model_version: &str,
    ) {
        info!(
            event = "prediction_served",
            service = %self.service,
            surface = %surface,
            label = label,
            confidence = confidence,
            model_version = %model_version,
            "Served prediction"
        );
    }

    /// Log a request rejected by input validation
    pub fn log_validation_rejected(&self, surface: &str, field: &str, detail: &str) {
        info!(
            event = "validation_rejected",
            service = %self.service,
            surface = %surface,
            field = %field,
            detail = %detail,
            "Rejected invalid input"
        );
    }

    /// Log an unexpected inference failure
    pub fn log_inference_error(&self, surface: &str, detail: &str) {
        error!(
            event = "inference_error",
            service = %self.service,
            surface = %surface,
            detail = %detail,
            "Inference failed"
        );
    }

    /// Log model artifact load outcome
    pub fn log_model_loaded(&self, model_version: &str, kernel: &str, success: bool) {
        if success {
            info!(
                event = "model_loaded",
                service = %self.service,
                model_version = %model_version,
                kernel = %kernel,
                "Model artifacts loaded"
            );
        } else {
            warn!(
                event = "model_load_failed",
                service = %self.service,
                "Model artifacts failed to load"
            );
        }
    }

    pub fn log_startup(&self, version: &str, model_version: &str) {
        info!(
            event = "service_started",
            service = %self.service,
            service_version = %version,
            model_version = %model_version,
            "Prediction service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service,
            reason = %reason,
            "Prediction service shutting down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_metrics_observations() {
        let metrics = ServiceMetrics::new();

        metrics.observe_prediction_latency(0.001);
        metrics.inc_predictions();
        metrics.inc_validation_errors();
        metrics.inc_inference_errors();
        metrics.set_model_version("v1.0.0", "rbf");
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("heart-predictor");
        assert_eq!(logger.service, "heart-predictor");
    }
}
