//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceError {
    /// A mandatory identity field (`product.id`, `farmer.id`, `order.id`) is absent.
    #[error("INPUT/missing required field `{0}`")]
    InvalidInput(String),

    #[error("FORMAT/{0}")]
    FormatError(String),

    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("SERIALIZE/{0}")]
    SerializeError(#[from] serde_json::Error),
}

impl TraceError {
    /// Short machine-readable code, the part before the slash.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INPUT",
            Self::FormatError(_) => "FORMAT",
            Self::ConfigError(_) => "CONFIG",
            Self::SerializeError(_) => "SERIALIZE",
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;
