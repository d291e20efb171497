//! Data Model: ProductRecord, FarmerRecord, OrderRecord
//!
//! Records arrive from the marketplace persistence layer as JSON documents.
//! Every field other than the identity keys is optional on the wire and
//! degrades to an empty default.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, TraceError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Coffee variety (ex: "SL28", "Ruiru 11")
    #[serde(default)]
    pub variety: Option<String>,
    #[serde(default)]
    pub roast_level: Option<String>,
    /// Processing method (ex: "Washed", "Natural")
    #[serde(default)]
    pub processing_method: Option<String>,
    /// Growing altitude in metres
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub harvest_date: Option<DateTime<Utc>>,
    /// Cupping score, 0-100
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub flavor_notes: Vec<String>,
    #[serde(default)]
    pub organic: bool,
    #[serde(default)]
    pub fair_trade: bool,
}

impl ProductRecord {
    /// Identity key, failing with `InvalidInput` only when absent. An empty
    /// id is passed through and hashed like any other.
    pub fn require_id(&self) -> Result<&str> {
        require(self.id.as_deref(), "product.id")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    /// Farm size in acres
    #[serde(default)]
    pub farm_size: Option<f64>,
    #[serde(default)]
    pub altitude_range: Option<AltitudeRange>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub sustainability_practices: Vec<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub brand_story: Option<String>,
    #[serde(default)]
    pub farm_images: Vec<String>,
    /// Platform name to profile URL
    #[serde(default)]
    pub social_media: BTreeMap<String, String>,
}

impl FarmerRecord {
    pub fn require_id(&self) -> Result<&str> {
        require(self.id.as_deref(), "farmer.id")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    /// Existing tracking number, kept when present
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub origin_county: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub estimated_delivery: Option<DateTime<Utc>>,
}

impl OrderRecord {
    pub fn require_id(&self) -> Result<&str> {
        require(self.id.as_deref(), "order.id")
    }

    /// The carried tracking number, ignoring blank strings.
    pub fn existing_tracking_number(&self) -> Option<&str> {
        self.tracking_number
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value.ok_or_else(|| TraceError::InvalidInput(field.to_string()))
}
