//! Server configuration

use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

/// Prediction server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Path to the serialized SVM model artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Path to the pre-fitted scaler artifact
    #[serde(default = "default_scaler_path")]
    pub scaler_path: String,

    /// Expected SHA-256 of the model artifact, verified at load when set
    #[serde(default)]
    pub model_sha256: Option<String>,

    /// Expected SHA-256 of the scaler artifact, verified at load when set
    #[serde(default)]
    pub scaler_sha256: Option<String>,
}

fn default_api_port() -> u16 {
    8000
}

fn default_model_path() -> String {
    "svm_heart_disease_model.json".to_string()
}

fn default_scaler_path() -> String {
    "scaler.json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            model_path: default_model_path(),
            scaler_path: default_scaler_path(),
            model_sha256: None,
            scaler_sha256: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment (HDP_ prefix)
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("HDP"))
            .build()?;

        Ok(Self::from_config(config))
    }

    /// Deserialize a built configuration, falling back to defaults on
    /// malformed values
    fn from_config(config: config::Config) -> Self {
        match config.try_deserialize() {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "Malformed HDP_* configuration value, falling back to defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.api_port, 8000);
        assert_eq!(config.scaler_path, "scaler.json");
        assert!(config.model_sha256.is_none());
    }

    #[test]
    fn test_overrides_applied() {
        let config = config::Config::builder()
            .set_override("api_port", 9090)
            .unwrap()
            .set_override("model_path", "custom_model.json")
            .unwrap()
            .build()
            .unwrap();

        let parsed = ServerConfig::from_config(config);
        assert_eq!(parsed.api_port, 9090);
        assert_eq!(parsed.model_path, "custom_model.json");
        assert_eq!(parsed.scaler_path, "scaler.json");
    }

    #[test]
    fn test_malformed_value_falls_back_to_defaults() {
        let config = config::Config::builder()
            .set_override("api_port", "not-a-number")
            .unwrap()
            .build()
            .unwrap();

        let parsed = ServerConfig::from_config(config);
        assert_eq!(parsed.api_port, 8000);
        assert_eq!(parsed.model_path, "svm_heart_disease_model.json");
    }
}
