use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// Hyperparameters for a three-layer network.
///
/// The activation is kept as its textual name so that an unknown kind is
/// reported by [`Network::new`](crate::Network::new), not while reading the
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    pub learning_rate: f64,
    #[serde(default = "default_activation")]
    pub activation: String,
    #[serde(default)]
    pub activation_param: f64,
}

fn default_activation() -> String {
    "sigmoid".to_string()
}

impl NetworkConfig {
    /// Sigmoid network with the given layer sizes and learning rate.
    pub fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize, learning_rate: f64) -> Self {
        NetworkConfig {
            input_nodes,
            hidden_nodes,
            output_nodes,
            learning_rate,
            activation: default_activation(),
            activation_param: 0.0,
        }
    }

    pub fn with_activation(mut self, name: impl Into<String>, param: f64) -> Self {
        self.activation = name.into();
        self.activation_param = param;
        self
    }

    /// Checks node counts and the learning rate.
    ///
    /// A learning rate of exactly zero is accepted; training then leaves the
    /// weights untouched.
    pub fn validate(&self) -> Result<()> {
        for (name, n) in [
            ("input_nodes", self.input_nodes),
            ("hidden_nodes", self.hidden_nodes),
            ("output_nodes", self.output_nodes),
        ] {
            if n == 0 {
                return Err(NetworkError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(NetworkError::InvalidConfig(format!(
                "learning_rate must be a finite non-negative number, got {}",
                self.learning_rate
            )));
        }
        if !self.activation_param.is_finite() {
            return Err(NetworkError::InvalidConfig(format!(
                "activation_param must be finite, got {}",
                self.activation_param
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<NetworkConfig> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fills_activation_defaults() {
        let cfg = NetworkConfig::from_json_str(
            r#"{"input_nodes": 3, "hidden_nodes": 4, "output_nodes": 2, "learning_rate": 0.3}"#,
        )
        .unwrap();
        assert_eq!(cfg, NetworkConfig::new(3, 4, 2, 0.3));
    }

    #[test]
    fn zero_nodes_are_rejected() {
        let err = NetworkConfig::new(3, 0, 2, 0.1).validate().unwrap_err();
        assert!(matches!(err, NetworkError::InvalidConfig(msg) if msg.contains("hidden_nodes")));
    }

    #[test]
    fn negative_or_nan_learning_rate_is_rejected() {
        assert!(NetworkConfig::new(1, 1, 1, -0.1).validate().is_err());
        assert!(NetworkConfig::new(1, 1, 1, f64::NAN).validate().is_err());
        assert!(NetworkConfig::new(1, 1, 1, 0.0).validate().is_ok());
    }

    #[test]
    fn load_json_reads_a_file() {
        let path = std::env::temp_dir().join("neuro_mlp_test_config.json");
        std::fs::write(
            &path,
            r#"{"input_nodes": 4, "hidden_nodes": 5, "output_nodes": 3,
                "learning_rate": 0.2, "activation": "elu", "activation_param": 0.5}"#,
        )
        .unwrap();

        let cfg = NetworkConfig::load_json(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg, NetworkConfig::new(4, 5, 3, 0.2).with_activation("elu", 0.5));
    }

    #[test]
    fn load_json_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("neuro_mlp_test_config_missing.json");
        std::fs::remove_file(&path).ok();
        let err = NetworkConfig::load_json(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, NetworkError::Io(_)));
    }

    #[test]
    fn load_json_rejects_malformed_file() {
        let path = std::env::temp_dir().join("neuro_mlp_test_config_bad.json");
        std::fs::write(&path, r#"{"input_nodes": 4"#).unwrap();
        let err = NetworkConfig::load_json(path.to_str().unwrap()).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, NetworkError::Json(_)));
    }
}
