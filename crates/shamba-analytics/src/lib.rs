//! Shamba Analytics: batch summaries over traceability payloads
//!
//! Counts payloads by variety, county, processing method and certification,
//! and buckets them by quality score:
//!
//! | Tier     | Score      |
//! |----------|------------|
//! | high     | >= 80      |
//! | medium   | 60 - 79.x  |
//! | standard | < 60, none |
//!
//! Missing keys are counted under [`UNKNOWN_KEY`].

pub mod aggregator;
pub mod summary;

pub use aggregator::{aggregate, aggregate_payloads, aggregate_values};
pub use summary::{
    AnalyticsSummary, QualityDistribution, QualityTier, HIGH_QUALITY_MIN, MEDIUM_QUALITY_MIN,
    UNKNOWN_KEY,
};
