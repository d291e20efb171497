//! Shamba QR: payload builders for traceability QR codes
//!
//! Produces the strings and JSON documents that an external encoder turns
//! into QR images. Rendering itself is out of scope; each payload only
//! carries suggested [`RenderHints`](shamba_core::RenderHints).
//!
//! # Payloads
//!
//! ```text
//! ProductRecord + FarmerRecord ──► TraceabilityId ──► ProductPayload
//!                                                     ├─ verificationUrl  (<base>/trace/<productId>)
//!                                                     └─ consumerSummary  (curated JSON)
//! FarmerRecord ──────────────────────────────────────► FarmerProfilePayload (<base>/farmers/<farmerId>)
//! OrderRecord ───────────────────────────────────────► LogisticsPayload     (<base>/track/<orderId>)
//! ```
//!
//! # Example
//!
//! ```
//! use shamba_core::{FarmerRecord, ProductRecord, TraceConfig};
//! use shamba_qr::build_product_payload;
//!
//! let config = TraceConfig::new("https://shamba2shelf.co.ke").unwrap();
//! let product = ProductRecord { id: Some("prod-001".into()), ..Default::default() };
//! let farmer = FarmerRecord { id: Some("farmer-042".into()), ..Default::default() };
//!
//! let payload = build_product_payload(&product, &farmer, &config).unwrap();
//! assert_eq!(payload.verification_url, "https://shamba2shelf.co.ke/trace/prod-001");
//! assert!(payload.traceability_id.as_str().starts_with("S2S-"));
//! ```

pub mod batch;
pub mod builder;
pub mod logistics;
pub mod summary;

pub use batch::{build_product_batch, BatchFailure, BatchItem, BatchOutcome};
pub use builder::{
    build_farmer_profile_payload, build_farmer_profile_payload_at, build_product_payload,
    build_product_payload_at, truncate_story,
};
pub use logistics::{build_logistics_payload, build_logistics_payload_with_rng, generate_tracking_number};
pub use summary::{
    ConsumerSummary, FarmFacts, FarmerProfile, FarmerProfilePayload, LogisticsPayload,
    ProductFacts, ProductPayload, ProductRenderHints, QualityFacts, ShipmentSummary,
    SustainabilityFacts,
};

pub const MAX_FLAVOR_NOTES: usize = 3;
pub const MAX_CERTIFICATIONS: usize = 3;
pub const MAX_PRACTICES: usize = 4;
pub const MAX_STORY_CHARS: usize = 200;
pub const STORY_ELLIPSIS: &str = "...";
/// Harvest year shown when the product has no harvest date
pub const CURRENT_HARVEST: &str = "Current";
