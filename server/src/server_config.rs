use serde::{Deserialize, Serialize};

/// Process configuration, loadable from an optional YAML file. Anything
/// not set in the file keeps its default.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub storage_path: String,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            storage_path: "leaderboard.json".to_string(),
            static_dir: "web".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_yaml_file(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;
        let config: ServerConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("Invalid listen address: {}", self.listen_addr));
        }
        if self.storage_path.is_empty() {
            return Err("Storage path must not be empty".to_string());
        }
        if self.static_dir.is_empty() {
            return Err("Static files directory must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ServerConfig =
            serde_yaml_ng::from_str("listen_addr: \"127.0.0.1:8080\"").unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.storage_path, "leaderboard.json");
        assert_eq!(config.static_dir, "web");
    }

    #[test]
    fn test_invalid_listen_addr_rejected() {
        let config = ServerConfig {
            listen_addr: "not-an-address".to_string(),
            ..ServerConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = ServerConfig {
            listen_addr: "127.0.0.1:9000".to_string(),
            storage_path: "scores.json".to_string(),
            static_dir: "public".to_string(),
        };
        std::fs::write(&path, serde_yaml_ng::to_string(&config).unwrap()).unwrap();

        let loaded = ServerConfig::from_yaml_file(path.to_str().unwrap()).unwrap();

        assert_eq!(loaded.listen_addr, "127.0.0.1:9000");
        assert_eq!(loaded.storage_path, "scores.json");
        assert_eq!(loaded.static_dir, "public");
    }
}
