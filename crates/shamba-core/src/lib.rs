//! Shamba Core: records, configuration and traceability identifiers
//!
//! Shared vocabulary for the QR payload builders, the verifier and the
//! analytics fold. Everything here is pure; configuration is passed in
//! explicitly rather than read from the process environment.

pub mod config;
pub mod data_model;
pub mod error;
pub mod traceability;

pub use config::{ErrorCorrection, RenderDefaults, RenderHints, TraceConfig};
pub use data_model::{AltitudeRange, Coordinates, FarmerRecord, OrderRecord, ProductRecord};
pub use error::{Result, TraceError};
pub use traceability::{hash_fragment, TraceabilityId, ID_PREFIX};

/// Service version reported by health checks
pub const SHAMBA_VERSION: &str = "1.0.0";
