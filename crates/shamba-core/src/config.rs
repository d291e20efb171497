//! Trace Config: explicit configuration handed to every builder call
use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};

/// QR error-correction level, passed through to the image encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

/// Rendering suggestions for the QR image encoder. Not part of the data contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderHints {
    pub size_px: u32,
    pub error_correction: ErrorCorrection,
    pub margin: u32,
}

impl RenderHints {
    pub const fn new(size_px: u32, error_correction: ErrorCorrection, margin: u32) -> Self {
        Self {
            size_px,
            error_correction,
            margin,
        }
    }
}

/// Per-payload rendering defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderDefaults {
    pub verification: RenderHints,
    /// The consumer summary is the densest payload, so it gets the highest correction level.
    pub consumer_summary: RenderHints,
    pub farmer_profile: RenderHints,
    pub logistics: RenderHints,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            verification: RenderHints::new(256, ErrorCorrection::M, 2),
            consumer_summary: RenderHints::new(400, ErrorCorrection::H, 4),
            farmer_profile: RenderHints::new(300, ErrorCorrection::M, 2),
            logistics: RenderHints::new(200, ErrorCorrection::Q, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceConfig {
    /// Public origin of the marketplace, without trailing slash
    base_url: String,
    pub render: RenderDefaults,
}

impl TraceConfig {
    /// Validate and normalise `base_url` (http/https scheme, non-empty host).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(&base_url.into())?,
            render: RenderDefaults::default(),
        })
    }

    pub fn with_render(mut self, render: RenderDefaults) -> Self {
        self.render = render;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/trace/<productId>`
    pub fn trace_url(&self, product_id: &str) -> String {
        format!("{}/trace/{}", self.base_url, product_id)
    }

    /// `<base>/farmers/<farmerId>`
    pub fn farmer_url(&self, farmer_id: &str) -> String {
        format!("{}/farmers/{}", self.base_url, farmer_id)
    }

    /// `<base>/track/<orderId>`
    pub fn tracking_url(&self, order_id: &str) -> String {
        format!("{}/track/{}", self.base_url, order_id)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| {
            TraceError::ConfigError(format!("base_url must start with http:// or https://, got {raw:?}"))
        })?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(TraceError::ConfigError(format!("base_url has no valid host: {raw:?}")));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = TraceConfig::new("https://shamba2shelf.co.ke/").unwrap();
        assert_eq!(config.base_url(), "https://shamba2shelf.co.ke");
        assert_eq!(
            config.trace_url("p1"),
            "https://shamba2shelf.co.ke/trace/p1"
        );
        assert_eq!(
            config.farmer_url("f1"),
            "https://shamba2shelf.co.ke/farmers/f1"
        );
        assert_eq!(
            config.tracking_url("o1"),
            "https://shamba2shelf.co.ke/track/o1"
        );
    }

    #[test]
    fn test_rejects_bad_base_urls() {
        for bad in ["", "shamba2shelf.co.ke", "ftp://host", "https://", "http:///path"] {
            let err = TraceConfig::new(bad).unwrap_err();
            assert_eq!(err.code(), "CONFIG", "expected config error for {bad:?}");
        }
    }

    #[test]
    fn test_localhost_with_port() {
        let config = TraceConfig::new("http://localhost:3000").unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_render_defaults() {
        let defaults = RenderDefaults::default();
        assert_eq!(defaults.consumer_summary.error_correction, ErrorCorrection::H);
        assert_eq!(defaults.logistics.size_px, 200);
    }
}
