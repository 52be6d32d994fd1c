//! Serialized model artifacts
//!
//! The classifier and scaler are opaque, externally trained artifacts
//! loaded verbatim from JSON files. Loading validates dimensionality and
//! optionally verifies a SHA-256 checksum before deserialization.

use crate::schema::FEATURE_COUNT;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Artifact loading failure
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact {path}: checksum mismatch (expected {expected}, computed {computed})")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        computed: String,
    },
    #[error("{context}: expected {expected} features, found {found}")]
    Dimension {
        context: String,
        expected: usize,
        found: usize,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Pre-fitted standard scaler: per-feature mean and scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl ScalerArtifact {
    /// Check dimensionality and scale entries after load
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.mean.len() != FEATURE_COUNT {
            return Err(ArtifactError::Dimension {
                context: "scaler mean".to_string(),
                expected: FEATURE_COUNT,
                found: self.mean.len(),
            });
        }
        if self.scale.len() != FEATURE_COUNT {
            return Err(ArtifactError::Dimension {
                context: "scaler scale".to_string(),
                expected: FEATURE_COUNT,
                found: self.scale.len(),
            });
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(ArtifactError::Invalid(
                "scaler scale entries must be finite and non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply the pre-fitted linear transform to an ordered feature vector
    pub fn transform(&self, values: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (values[i] - self.mean[i]) / self.scale[i];
        }
        scaled
    }
}

/// SVM kernel parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kernel", rename_all = "lowercase")]
pub enum Kernel {
    Linear {
        weights: Vec<f64>,
    },
    Rbf {
        support_vectors: Vec<Vec<f64>>,
        dual_coef: Vec<f64>,
        gamma: f64,
    },
}

/// Pre-trained SVM classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmArtifact {
    pub version: String,
    pub intercept: f64,
    #[serde(flatten)]
    pub kernel: Kernel,
}

impl SvmArtifact {
    /// Check kernel dimensionality after load
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match &self.kernel {
            Kernel::Linear { weights } => {
                if weights.len() != FEATURE_COUNT {
                    return Err(ArtifactError::Dimension {
                        context: "svm weights".to_string(),
                        expected: FEATURE_COUNT,
                        found: weights.len(),
                    });
                }
            }
            Kernel::Rbf {
                support_vectors,
                dual_coef,
                gamma,
            } => {
                if support_vectors.is_empty() {
                    return Err(ArtifactError::Invalid(
                        "rbf kernel requires at least one support vector".to_string(),
                    ));
                }
                for sv in support_vectors {
                    if sv.len() != FEATURE_COUNT {
                        return Err(ArtifactError::Dimension {
                            context: "svm support vector".to_string(),
                            expected: FEATURE_COUNT,
                            found: sv.len(),
                        });
                    }
                }
                if dual_coef.len() != support_vectors.len() {
                    return Err(ArtifactError::Dimension {
                        context: "svm dual coefficients".to_string(),
                        expected: support_vectors.len(),
                        found: dual_coef.len(),
                    });
                }
                if !gamma.is_finite() || *gamma <= 0.0 {
                    return Err(ArtifactError::Invalid(
                        "rbf gamma must be finite and positive".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Signed distance from the separating boundary for a scaled vector
    pub fn decision_function(&self, scaled: &[f64; FEATURE_COUNT]) -> f64 {
        match &self.kernel {
            Kernel::Linear { weights } => {
                let dot: f64 = weights.iter().zip(scaled.iter()).map(|(w, x)| w * x).sum();
                dot + self.intercept
            }
            Kernel::Rbf {
                support_vectors,
                dual_coef,
                gamma,
            } => {
                let sum: f64 = support_vectors
                    .iter()
                    .zip(dual_coef.iter())
                    .map(|(sv, coef)| {
                        let sq_dist: f64 = sv
                            .iter()
                            .zip(scaled.iter())
                            .map(|(a, b)| (a - b) * (a - b))
                            .sum();
                        coef * (-gamma * sq_dist).exp()
                    })
                    .sum();
                sum + self.intercept
            }
        }
    }
}

/// Load a JSON artifact from disk, verifying an optional SHA-256 checksum
/// against the raw file bytes before parsing.
pub fn load_artifact<T: DeserializeOwned>(
    path: &Path,
    expected_sha256: Option<&str>,
) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(expected) = expected_sha256 {
        let computed = hex::encode(Sha256::digest(&bytes));
        if !computed.eq_ignore_ascii_case(expected) {
            return Err(ArtifactError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected: expected.to_string(),
                computed,
            });
        }
    }

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
