//! Model loading and inference

mod artifact;
mod inference;
mod output;

pub use artifact::{load_artifact, ArtifactError, Kernel, ScalerArtifact, SvmArtifact};
pub use inference::{PredictError, SvmPredictor};
pub use output::{result_text, DISEASE_DETECTED, NO_DISEASE_DETECTED};
