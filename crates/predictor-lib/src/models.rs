//! Core data models for the heart disease predictor

use crate::schema::{ValidationError, FEATURES, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Patient features as submitted by a caller, one field per model input.
///
/// Constructed fresh per request, validated once, consumed once by the
/// model call, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientFeatures {
    pub age: f64,
    pub sex: f64,
    pub chest_pain_type: f64,
    pub cholesterol: f64,
    pub ekg_results: f64,
    pub max_hr: f64,
    pub exercise_angina: f64,
    pub st_depression: f64,
    pub slope_of_st: f64,
    pub number_of_vessels_fluro: f64,
    pub thallium: f64,
}

impl PatientFeatures {
    /// Build a record from values in model order
    pub fn from_vector(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            age: values[0],
            sex: values[1],
            chest_pain_type: values[2],
            cholesterol: values[3],
            ekg_results: values[4],
            max_hr: values[5],
            exercise_angina: values[6],
            st_depression: values[7],
            slope_of_st: values[8],
            number_of_vessels_fluro: values[9],
            thallium: values[10],
        }
    }

    /// Values in model order, unvalidated
    pub fn raw_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.sex,
            self.chest_pain_type,
            self.cholesterol,
            self.ekg_results,
            self.max_hr,
            self.exercise_angina,
            self.st_depression,
            self.slope_of_st,
            self.number_of_vessels_fluro,
            self.thallium,
        ]
    }

    /// Validate every field against its range and assemble the ordered
    /// feature vector handed to the scaler.
    pub fn to_vector(&self) -> Result<[f64; FEATURE_COUNT], ValidationError> {
        let values = self.raw_vector();
        for (field, value) in FEATURES.iter().zip(values.iter()) {
            field.validate(*value)?;
        }
        Ok(values)
    }
}

/// Prediction output for a single patient vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Class label: 1 = heart disease detected, 0 = not detected
    pub prediction: u8,
    /// Absolute decision-function value, used as a confidence proxy
    pub confidence_score: f64,
    /// Signed distance from the separating boundary
    pub decision_value: f64,
    pub result_text: String,
    pub model_version: String,
    pub generated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_features() -> PatientFeatures {
        PatientFeatures {
            age: 54.0,
            sex: 1.0,
            chest_pain_type: 2.0,
            cholesterol: 240.0,
            ekg_results: 0.0,
            max_hr: 150.0,
            exercise_angina: 0.0,
            st_depression: 1.2,
            slope_of_st: 1.0,
            number_of_vessels_fluro: 0.0,
            thallium: 3.0,
        }
    }

    #[test]
    fn test_vector_order_matches_schema() {
        let features = valid_features();
        let vector = features.to_vector().unwrap();
        assert_eq!(vector[0], 54.0); // age
        assert_eq!(vector[3], 240.0); // cholesterol
        assert_eq!(vector[10], 3.0); // thallium
    }

    #[test]
    fn test_out_of_range_field_rejected() {
        let mut features = valid_features();
        features.max_hr = 251.0;
        let err = features.to_vector().unwrap_err();
        assert_eq!(err.field(), "max_hr");
    }

    #[test]
    fn test_nan_rejected() {
        let mut features = valid_features();
        features.st_depression = f64::NAN;
        assert!(features.to_vector().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let features = valid_features();
        let json = serde_json::to_string(&features).unwrap();
        let back: PatientFeatures = serde_json::from_str(&json).unwrap();
        assert_eq!(back.age, features.age);
        assert_eq!(back.thallium, features.thallium);
    }

    #[test]
    fn test_non_numeric_json_rejected() {
        let json = r#"{
            "age": "fifty", "sex": 1, "chest_pain_type": 2, "cholesterol": 240,
            "ekg_results": 0, "max_hr": 150, "exercise_angina": 0,
            "st_depression": 1.2, "slope_of_st": 1,
            "number_of_vessels_fluro": 0, "thallium": 3
        }"#;
        assert!(serde_json::from_str::<PatientFeatures>(json).is_err());
    }
}
