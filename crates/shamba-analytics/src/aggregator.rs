//! Fold payloads into an [`AnalyticsSummary`]
use serde::Deserialize;
use serde_json::Value;
use shamba_qr::{ConsumerSummary, ProductPayload};
use tracing::debug;

use crate::summary::AnalyticsSummary;

/// Aggregate already-typed consumer summaries.
pub fn aggregate<'a, I>(summaries: I) -> AnalyticsSummary
where
    I: IntoIterator<Item = &'a ConsumerSummary>,
{
    summaries
        .into_iter()
        .fold(AnalyticsSummary::new(), |mut acc, summary| {
            acc.record(summary);
            acc
        })
}

pub fn aggregate_payloads(payloads: &[ProductPayload]) -> AnalyticsSummary {
    aggregate(payloads.iter().map(|p| &p.consumer_summary))
}

/// Aggregate raw JSON documents, either full product payloads (with a
/// `consumerSummary` key) or bare consumer summaries. Elements that decode
/// as neither are counted in `skipped`.
pub fn aggregate_values(values: &[Value]) -> AnalyticsSummary {
    let mut summary = AnalyticsSummary::new();
    for (index, value) in values.iter().enumerate() {
        match decode_summary(value) {
            Some(decoded) => summary.record(&decoded),
            None => {
                debug!(index, "skipping malformed payload");
                summary.record_skipped();
            }
        }
    }
    summary
}

fn decode_summary(value: &Value) -> Option<ConsumerSummary> {
    let candidate = value.get("consumerSummary").unwrap_or(value);
    ConsumerSummary::deserialize(candidate).ok()
}
