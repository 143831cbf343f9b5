use serde::Deserialize;
use service_core::config::{self as core_config, ServerConfig, TelemetryConfig};
use service_core::error::AppError;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    /// The analysis engine is a FastAPI app, hence the section name.
    #[serde(default)]
    pub fastapi: FastApiSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FastApiSettings {
    /// Base URL of the analysis engine; `/analyze` is appended.
    #[serde(default = "default_fastapi_url")]
    pub url: String,
    /// Upper bound on the whole outbound call.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl FastApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for FastApiSettings {
    fn default() -> Self {
        Self {
            url: default_fastapi_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

fn default_fastapi_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_ms() -> u64 {
    60_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Settings {
    /// Defaults, then `configuration.*`, then `APP__*` environment variables
    /// (`APP__FASTAPI__URL=http://analysis:8000`).
    pub fn load() -> Result<Self, AppError> {
        core_config::load(core_config::builder())
    }
}
