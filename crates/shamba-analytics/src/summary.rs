//! Analytics summary and its fold
//!
//! Every counter is a commutative increment into a `BTreeMap`, so the
//! summary is independent of input order and two partial summaries can be
//! merged.

use serde::{Deserialize, Serialize};
use shamba_qr::ConsumerSummary;
use std::collections::BTreeMap;

/// Key used when a variety, county or processing method is missing
pub const UNKNOWN_KEY: &str = "unknown";

pub const HIGH_QUALITY_MIN: f64 = 80.0;
pub const MEDIUM_QUALITY_MIN: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    High,
    Medium,
    Standard,
}

impl QualityTier {
    /// A missing score falls into `Standard`.
    pub fn for_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s >= HIGH_QUALITY_MIN => Self::High,
            Some(s) if s >= MEDIUM_QUALITY_MIN => Self::Medium,
            _ => Self::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityDistribution {
    pub high: u64,
    pub medium: u64,
    pub standard: u64,
}

impl QualityDistribution {
    pub fn record(&mut self, tier: QualityTier) {
        match tier {
            QualityTier::High => self.high += 1,
            QualityTier::Medium => self.medium += 1,
            QualityTier::Standard => self.standard += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.high + self.medium + self.standard
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Payloads counted
    pub total: u64,
    /// Elements that could not be read as payloads
    pub skipped: u64,
    pub by_variety: BTreeMap<String, u64>,
    pub by_county: BTreeMap<String, u64>,
    pub by_processing: BTreeMap<String, u64>,
    pub by_certification: BTreeMap<String, u64>,
    pub quality_distribution: QualityDistribution,
}

impl AnalyticsSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one consumer summary.
    pub fn record(&mut self, summary: &ConsumerSummary) {
        self.total += 1;
        bump(&mut self.by_variety, summary.product.variety.as_deref());
        bump(&mut self.by_county, summary.farm.county.as_deref());
        bump(&mut self.by_processing, summary.product.processing.as_deref());
        for certification in &summary.quality.certifications {
            bump(&mut self.by_certification, Some(certification.as_str()));
        }
        self.quality_distribution
            .record(QualityTier::for_score(summary.quality.score));
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Combine with a summary computed over a disjoint set of payloads.
    pub fn merge(mut self, other: AnalyticsSummary) -> AnalyticsSummary {
        self.total += other.total;
        self.skipped += other.skipped;
        merge_counts(&mut self.by_variety, other.by_variety);
        merge_counts(&mut self.by_county, other.by_county);
        merge_counts(&mut self.by_processing, other.by_processing);
        merge_counts(&mut self.by_certification, other.by_certification);
        self.quality_distribution.high += other.quality_distribution.high;
        self.quality_distribution.medium += other.quality_distribution.medium;
        self.quality_distribution.standard += other.quality_distribution.standard;
        self
    }

    /// Most common variety, ties broken alphabetically.
    pub fn top_variety(&self) -> Option<(&str, u64)> {
        self.by_variety
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, v)| (k.as_str(), *v))
    }
}

fn bump(counts: &mut BTreeMap<String, u64>, key: Option<&str>) {
    let key = match key.map(str::trim) {
        Some(k) if !k.is_empty() => k,
        _ => UNKNOWN_KEY,
    };
    *counts.entry(key.to_string()).or_insert(0) += 1;
}

fn merge_counts(into: &mut BTreeMap<String, u64>, from: BTreeMap<String, u64>) {
    for (key, count) in from {
        *into.entry(key).or_insert(0) += count;
    }
}
