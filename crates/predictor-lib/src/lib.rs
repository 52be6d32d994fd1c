//! Core library for the heart disease prediction service
//!
//! This crate provides:
//! - The eleven-feature schema and per-field range validation
//! - Model artifact loading (scaler + serialized SVM) with checksum checks
//! - Scaler transform and SVM decision-function inference
//! - Health checks and observability

pub mod health;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod schema;

pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::{PatientFeatures, Prediction};
pub use observability::{ServiceMetrics, StructuredLogger};
pub use predictor::{
    load_artifact, ArtifactError, Kernel, PredictError, ScalerArtifact, SvmArtifact, SvmPredictor,
};
pub use schema::{FeatureField, ValidationError, FEATURES, FEATURE_COUNT};
