//! Feature schema for the heart disease model
//!
//! Defines the eleven input features in the exact order the scaler and
//! classifier were fit on, together with their inclusive valid ranges.

use thiserror::Error;

/// Number of input features expected by the model
pub const FEATURE_COUNT: usize = 11;

/// A single named feature with its inclusive valid range
#[derive(Debug, Clone, Copy)]
pub struct FeatureField {
    /// Machine-readable field name (matches the JSON API)
    pub name: &'static str,
    /// Display label for prompts and tables
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    /// One-line guidance shown to operators
    pub guidance: &'static str,
}

/// Feature fields in model order. Reordering breaks the scaler transform.
pub static FEATURES: [FeatureField; FEATURE_COUNT] = [
    FeatureField {
        name: "age",
        label: "Age",
        min: 0.0,
        max: 120.0,
        guidance: "Patient age in years",
    },
    FeatureField {
        name: "sex",
        label: "Sex",
        min: 0.0,
        max: 1.0,
        guidance: "Sex (0=Female, 1=Male)",
    },
    FeatureField {
        name: "chest_pain_type",
        label: "Chest pain type",
        min: 0.0,
        max: 4.0,
        guidance: "Type of chest pain (0-4)",
    },
    FeatureField {
        name: "cholesterol",
        label: "Cholesterol",
        min: 0.0,
        max: 400.0,
        guidance: "Serum cholesterol in mg/dl",
    },
    FeatureField {
        name: "ekg_results",
        label: "EKG results",
        min: 0.0,
        max: 2.0,
        guidance: "EKG results (0-2)",
    },
    FeatureField {
        name: "max_hr",
        label: "Max HR",
        min: 0.0,
        max: 250.0,
        guidance: "Maximum heart rate achieved",
    },
    FeatureField {
        name: "exercise_angina",
        label: "Exercise angina",
        min: 0.0,
        max: 1.0,
        guidance: "Exercise induced angina (0=No, 1=Yes)",
    },
    FeatureField {
        name: "st_depression",
        label: "ST depression",
        min: 0.0,
        max: 10.0,
        guidance: "ST depression induced by exercise",
    },
    FeatureField {
        name: "slope_of_st",
        label: "Slope of ST",
        min: 0.0,
        max: 3.0,
        guidance: "Slope of ST segment",
    },
    FeatureField {
        name: "number_of_vessels_fluro",
        label: "Number of vessels fluro",
        min: 0.0,
        max: 3.0,
        guidance: "Number of major vessels (0-3)",
    },
    FeatureField {
        name: "thallium",
        label: "Thallium",
        min: 0.0,
        max: 7.0,
        guidance: "Thallium test result (0-7)",
    },
];

/// Per-field validation failure
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field}: value {value} is out of range, expected {min} to {max} inclusive")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field}: value must be a finite number")]
    NotFinite { field: &'static str },
}

impl ValidationError {
    /// Name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::NotFinite { field } => field,
        }
    }
}

impl FeatureField {
    /// Check a value against this field's inclusive range
    pub fn validate(&self, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field: self.name });
        }
        if value < self.min || value > self.max {
            return Err(ValidationError::OutOfRange {
                field: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Look up a field by its machine-readable name
pub fn field_by_name(name: &str) -> Option<&'static FeatureField> {
    FEATURES.iter().find(|f| f.name == name)
}
