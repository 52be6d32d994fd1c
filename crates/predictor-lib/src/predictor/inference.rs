//! SVM inference over validated feature vectors
//!
//! Applies the pre-fitted scaler and the pre-trained classifier to a
//! validated, ordered feature vector. Artifacts are loaded once and never
//! mutated afterwards, so the predictor is freely shareable across requests.

use super::artifact::{load_artifact, ArtifactError, Kernel, ScalerArtifact, SvmArtifact};
use super::output::result_text;
use crate::models::{PatientFeatures, Prediction};
use crate::schema::ValidationError;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// Inference latency above this is logged as slow
const MAX_INFERENCE_MS: u128 = 5;

/// Prediction failure
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("model produced a non-finite decision value")]
    NonFiniteDecision,
}

/// Predictor combining the pre-fitted scaler and the pre-trained SVM
pub struct SvmPredictor {
    scaler: ScalerArtifact,
    model: SvmArtifact,
}

impl SvmPredictor {
    /// Build a predictor from already-loaded artifacts
    pub fn new(scaler: ScalerArtifact, model: SvmArtifact) -> Result<Self, ArtifactError> {
        scaler.validate()?;
        model.validate()?;
        Ok(Self { scaler, model })
    }

    /// Load both artifacts from disk, verifying optional checksums
    pub fn load(
        scaler_path: &Path,
        model_path: &Path,
        scaler_sha256: Option<&str>,
        model_sha256: Option<&str>,
    ) -> Result<Self, ArtifactError> {
        let scaler: ScalerArtifact = load_artifact(scaler_path, scaler_sha256)?;
        let model: SvmArtifact = load_artifact(model_path, model_sha256)?;
        Self::new(scaler, model)
    }

    pub fn model_version(&self) -> &str {
        &self.model.version
    }

    pub fn kernel_name(&self) -> &'static str {
        match self.model.kernel {
            Kernel::Linear { .. } => "linear",
            Kernel::Rbf { .. } => "rbf",
        }
    }

    /// Validate, scale, and classify a patient feature record
    pub fn predict(&self, features: &PatientFeatures) -> Result<Prediction, PredictError> {
        let start = Instant::now();

        let vector = features.to_vector()?;
        let scaled = self.scaler.transform(&vector);
        let decision = self.model.decision_function(&scaled);

        if !decision.is_finite() {
            return Err(PredictError::NonFiniteDecision);
        }

        let label = u8::from(decision > 0.0);

        let elapsed = start.elapsed();
        if elapsed.as_millis() > MAX_INFERENCE_MS {
            warn!(
                elapsed_ms = elapsed.as_millis(),
                "Inference exceeded {}ms target", MAX_INFERENCE_MS
            );
        } else {
            debug!(elapsed_us = elapsed.as_micros(), "Inference completed");
        }

        Ok(Prediction {
            prediction: label,
            confidence_score: decision.abs(),
            decision_value: decision,
            result_text: result_text(label).to_string(),
            model_version: self.model.version.clone(),
            generated_at: chrono::Utc::now().timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FEATURE_COUNT;

    fn identity_scaler() -> ScalerArtifact {
        ScalerArtifact {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    // Positive weight on age only: decision = age - 50
    fn age_threshold_model() -> SvmArtifact {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[0] = 1.0;
        SvmArtifact {
            version: "v-test".to_string(),
            intercept: -50.0,
            kernel: Kernel::Linear { weights },
        }
    }

    fn features_with_age(age: f64) -> PatientFeatures {
        PatientFeatures {
            age,
            sex: 1.0,
            chest_pain_type: 2.0,
            cholesterol: 200.0,
            ekg_results: 0.0,
            max_hr: 150.0,
            exercise_angina: 0.0,
            st_depression: 1.0,
            slope_of_st: 1.0,
            number_of_vessels_fluro: 0.0,
            thallium: 3.0,
        }
    }

    #[test]
    fn test_positive_label() {
        let predictor = SvmPredictor::new(identity_scaler(), age_threshold_model()).unwrap();
        let prediction = predictor.predict(&features_with_age(60.0)).unwrap();
        assert_eq!(prediction.prediction, 1);
        assert!((prediction.confidence_score - 10.0).abs() < 1e-9);
        assert_eq!(prediction.result_text, "Heart Disease Detected");
    }

    #[test]
    fn test_negative_label() {
        let predictor = SvmPredictor::new(identity_scaler(), age_threshold_model()).unwrap();
        let prediction = predictor.predict(&features_with_age(40.0)).unwrap();
        assert_eq!(prediction.prediction, 0);
        assert!((prediction.decision_value + 10.0).abs() < 1e-9);
        assert_eq!(prediction.result_text, "No Heart Disease Detected");
    }

    #[test]
    fn test_determinism() {
        let predictor = SvmPredictor::new(identity_scaler(), age_threshold_model()).unwrap();
        let features = features_with_age(63.0);
        let first = predictor.predict(&features).unwrap();
        let second = predictor.predict(&features).unwrap();
        assert_eq!(first.prediction, second.prediction);
        assert_eq!(first.decision_value, second.decision_value);
        assert_eq!(first.confidence_score, second.confidence_score);
    }

    #[test]
    fn test_scaler_applied_before_classifier() {
        let mut scaler = identity_scaler();
        scaler.mean[0] = 50.0;
        scaler.scale[0] = 10.0;
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[0] = 1.0;
        let model = SvmArtifact {
            version: "v-test".to_string(),
            intercept: 0.0,
            kernel: Kernel::Linear { weights },
        };
        let predictor = SvmPredictor::new(scaler, model).unwrap();

        // (60 - 50) / 10 = 1.0
        let prediction = predictor.predict(&features_with_age(60.0)).unwrap();
        assert!((prediction.decision_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_rejected_before_model_call() {
        let predictor = SvmPredictor::new(identity_scaler(), age_threshold_model()).unwrap();
        let err = predictor.predict(&features_with_age(121.0)).unwrap_err();
        match err {
            PredictError::Validation(v) => assert_eq!(v.field(), "age"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_rbf_prediction_deterministic() {
        let model = SvmArtifact {
            version: "v-rbf".to_string(),
            intercept: -0.2,
            kernel: Kernel::Rbf {
                support_vectors: vec![vec![0.5; FEATURE_COUNT], vec![-0.5; FEATURE_COUNT]],
                dual_coef: vec![1.0, -1.0],
                gamma: 0.05,
            },
        };
        let predictor = SvmPredictor::new(identity_scaler(), model).unwrap();
        let features = features_with_age(54.0);
        let first = predictor.predict(&features).unwrap();
        let second = predictor.predict(&features).unwrap();
        assert_eq!(first.decision_value, second.decision_value);
        assert_eq!(first.confidence_score, first.decision_value.abs());
    }

    #[test]
    fn test_mismatched_artifacts_rejected() {
        let model = SvmArtifact {
            version: "v-test".to_string(),
            intercept: 0.0,
            kernel: Kernel::Linear {
                weights: vec![1.0; 3],
            },
        };
        assert!(SvmPredictor::new(identity_scaler(), model).is_err());
    }
}
