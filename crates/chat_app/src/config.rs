use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chat_engine::TransportSettings;
use chat_logging::chat_info;
use serde::{Deserialize, Serialize};

use crate::logging::LogDestination;

const CONFIG_FILENAME: &str = "./chat_widget.ron";
const CONFIG_PATH_VAR: &str = "CHAT_WIDGET_CONFIG";
const ENDPOINT_VAR: &str = "CHAT_WIDGET_ENDPOINT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    /// Unset means the widget waits for the backend indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
}

impl Default for ChatConfig {
    fn default() -> Self {
        let transport = TransportSettings::default();
        Self {
            endpoint: transport.endpoint,
            connect_timeout_secs: transport.connect_timeout.as_secs(),
            request_timeout_secs: transport.request_timeout.map(|t| t.as_secs()),
            max_response_bytes: transport.max_bytes,
            log_destination: LogDestination::default(),
        }
    }
}

impl ChatConfig {
    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    fn apply_endpoint_override(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
    }
}

/// Loads the config file named by `CHAT_WIDGET_CONFIG` (or `./chat_widget.ron`)
/// and applies the `CHAT_WIDGET_ENDPOINT` override.
pub fn load_from_env() -> Result<ChatConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let mut config = load(&path)?;
    config.apply_endpoint_override(std::env::var(ENDPOINT_VAR).ok());
    Ok(config)
}

/// A missing file yields defaults; unreadable or malformed files are errors.
pub fn load(path: &Path) -> Result<ChatConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ChatConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config: ChatConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    chat_info!("Loaded configuration from {:?}", path);
    Ok(config)
}
