//! Service configuration: TOML file first, then command-line/env overrides.
//!
//! ```toml
//! listen_addr = "0.0.0.0:8787"
//! log_filter = "shamba_api=debug,tower_http=info"
//! base_url = "https://shamba2shelf.co.ke"
//!
//! [render.consumerSummary]
//! sizePx = 480
//! errorCorrection = "H"
//! margin = 4
//! ```
use serde::Deserialize;
use shamba_core::{RenderDefaults, TraceConfig, TraceError};
use std::path::Path;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_LOG_FILTER: &str = "shamba_api=info,tower_http=info";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub listen_addr: Option<String>,
    pub log_filter: Option<String>,
    pub base_url: Option<String>,
    pub render: Option<RenderDefaults>,
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self, TraceError> {
        toml::from_str(text).map_err(|e| TraceError::ConfigError(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TraceError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }
}

/// Values supplied on the command line or through `SHAMBA_*` variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen_addr: Option<String>,
    pub log_filter: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub log_filter: String,
    pub trace: TraceConfig,
}

impl ServiceConfig {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, TraceError> {
        let base_url = overrides
            .base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let trace = TraceConfig::new(base_url)?.with_render(file.render.unwrap_or_default());

        Ok(Self {
            listen_addr: overrides
                .listen_addr
                .or(file.listen_addr)
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            log_filter: overrides
                .log_filter
                .or(file.log_filter)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            trace,
        })
    }
}
