//! Payload types handed to the QR image encoder
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shamba_core::{RenderHints, TraceabilityId};
use std::collections::BTreeMap;

/// Both tiers of a product QR: the short verification URL and the rich summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub traceability_id: TraceabilityId,
    pub verification_url: String,
    pub consumer_summary: ConsumerSummary,
    /// `blake3:<hex>` over the serialised consumer summary
    pub payload_digest: String,
    pub render_hints: ProductRenderHints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRenderHints {
    pub verification: RenderHints,
    pub consumer_summary: RenderHints,
}

/// Consumer-facing view embedded in the rich QR tier.
///
/// `product`, `farm`, `quality`, `traceabilityId` and `generatedAt` are
/// required when decoding; everything inside them defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerSummary {
    pub product: ProductFacts,
    pub farm: FarmFacts,
    pub quality: QualityFacts,
    #[serde(default)]
    pub sustainability: SustainabilityFacts,
    #[serde(default)]
    pub story: String,
    pub traceability_id: TraceabilityId,
    #[serde(default)]
    pub url: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductFacts {
    pub name: Option<String>,
    pub variety: Option<String>,
    pub roast: Option<String>,
    pub processing: Option<String>,
    /// First three notes only
    pub flavor_notes: Vec<String>,
    pub organic: bool,
    pub fair_trade: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FarmFacts {
    pub farmer: Option<String>,
    pub county: Option<String>,
    /// `"1600-1900m"`, `"1750m"` or empty
    pub altitude: String,
    /// `"12 acres"` or empty
    pub size: String,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityFacts {
    pub score: Option<f64>,
    /// Four-digit year, or `"Current"` when the harvest date is unknown
    pub harvest_year: String,
    /// First three certifications only
    pub certifications: Vec<String>,
}

impl Default for QualityFacts {
    fn default() -> Self {
        Self {
            score: None,
            harvest_year: crate::CURRENT_HARVEST.to_string(),
            certifications: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SustainabilityFacts {
    /// First four practices only
    pub practices: Vec<String>,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfilePayload {
    pub profile_url: String,
    pub profile: FarmerProfile,
    pub generated_at: DateTime<Utc>,
    pub render_hints: RenderHints,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    pub farmer_id: String,
    pub name: Option<String>,
    pub county: Option<String>,
    pub altitude: String,
    pub size: String,
    pub certifications: Vec<String>,
    pub practices: Vec<String>,
    pub rating: Option<f64>,
    pub quality_score: Option<f64>,
    pub verified: bool,
    pub story: String,
    pub cover_image: Option<String>,
    pub social_media: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsPayload {
    pub tracking_url: String,
    pub tracking_number: String,
    /// False when the order already carried a tracking number
    pub tracking_number_generated: bool,
    pub shipment: ShipmentSummary,
    pub generated_at: DateTime<Utc>,
    pub render_hints: RenderHints,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentSummary {
    pub order_id: String,
    pub status: Option<String>,
    pub product: Option<String>,
    /// `"60 kg"`, `"60"` or empty
    pub quantity: String,
    pub buyer: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub estimated_delivery: Option<DateTime<Utc>>,
}
