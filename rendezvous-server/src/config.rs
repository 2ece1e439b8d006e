use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::ServerError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub solver: SolverConfig,
    /// Delay before an error notice hides itself
    pub notice_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
    pub cors_origins: Vec<String>,
    pub initial_zoom: u8,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            solver: SolverConfig::default(),
            notice_timeout_secs: 5,
            request_timeout_secs: 60,
            max_concurrent_requests: 64,
            cors_origins: [
                "http://localhost:5500",
                "http://127.0.0.1:5500",
                "http://localhost:3000",
                "http://127.0.0.1:3000",
            ]
            .map(String::from)
            .to_vec(),
            initial_zoom: 14,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Reads a TOML file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ServerError> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn notice_timeout(&self) -> Duration {
        Duration::from_secs(self.notice_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl SolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
