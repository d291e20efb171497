//! Recompute hash fragments and compare them with the identifier
use serde::{Deserialize, Serialize};
use shamba_core::traceability::{from_base36, SEGMENT_DELIMITER};
use shamba_core::{hash_fragment, ID_PREFIX};
use tracing::debug;

use crate::verdict::{RejectionReason, VerificationResult};

/// Check `traceability_id` against the product and farmer keys it claims to bind.
pub fn verify(traceability_id: &str, product_id: &str, farmer_id: &str) -> VerificationResult {
    let segments: Vec<&str> = traceability_id.split(SEGMENT_DELIMITER).collect();
    let [prefix, timestamp, product_fragment, farmer_fragment] = segments.as_slice() else {
        return reject(traceability_id, RejectionReason::InvalidFormat, None);
    };
    if *prefix != ID_PREFIX {
        return reject(traceability_id, RejectionReason::InvalidFormat, None);
    }

    let Some(issued_at_ms) = from_base36(timestamp) else {
        return reject(traceability_id, RejectionReason::InvalidTimestamp, None);
    };

    if hash_fragment(product_id) != *product_fragment {
        return reject(traceability_id, RejectionReason::ProductMismatch, Some(issued_at_ms));
    }
    if hash_fragment(farmer_id) != *farmer_fragment {
        return reject(traceability_id, RejectionReason::FarmerMismatch, Some(issued_at_ms));
    }

    VerificationResult::Verified { issued_at_ms }
}

fn reject(
    traceability_id: &str,
    reason: RejectionReason,
    issued_at_ms: Option<u64>,
) -> VerificationResult {
    debug!(traceability_id, %reason, "traceability id rejected");
    VerificationResult::Rejected { reason, issued_at_ms }
}

/// One entry of a bulk verification request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub traceability_id: String,
    pub product_id: String,
    pub farmer_id: String,
}

impl VerificationRequest {
    pub fn verify(&self) -> VerificationResult {
        verify(&self.traceability_id, &self.product_id, &self.farmer_id)
    }
}

/// Verify each request independently, keeping input order.
pub fn verify_many(requests: &[VerificationRequest]) -> Vec<VerificationResult> {
    requests.iter().map(VerificationRequest::verify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shamba_core::TraceabilityId;

    const T: u64 = 1_704_067_200_000;

    #[test]
    fn test_round_trip_verifies() {
        let id = TraceabilityId::compose("prod-001", "farmer-042", T);
        let result = verify(id.as_str(), "prod-001", "farmer-042");

        assert!(result.is_valid());
        assert_eq!(result.reason(), "Verified");
        assert_eq!(
            result.issued_at(),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_tampered_product_is_rejected() {
        let id = TraceabilityId::compose("prod-001", "farmer-042", T);
        let result = verify(id.as_str(), "prod-002", "farmer-042");

        assert!(!result.is_valid());
        assert_eq!(result.rejection(), Some(RejectionReason::ProductMismatch));
        assert!(result.reason().contains("hash mismatch"));
        assert_eq!(result.issued_at_ms(), Some(T));
    }

    #[test]
    fn test_tampered_farmer_is_rejected() {
        let id = TraceabilityId::compose("prod-001", "farmer-042", T);
        let result = verify(id.as_str(), "prod-001", "farmer-043");
        assert_eq!(result.rejection(), Some(RejectionReason::FarmerMismatch));
    }

    #[test]
    fn test_malformed_ids() {
        for raw in [
            "not-a-valid-id",
            "",
            "S2S",
            "S2S-LQU5M2O0-900150",
            "S2S-LQU5M2O0-900150-D41D8C-EXTRA",
            "ABC-LQU5M2O0-900150-D41D8C",
            "s2s-lqu5m2o0-900150-d41d8c",
        ] {
            let result = verify(raw, "p", "f");
            assert_eq!(result.rejection(), Some(RejectionReason::InvalidFormat), "{raw:?}");
            assert_eq!(result.reason(), "Invalid traceability ID format");
            assert!(result.issued_at_ms().is_none());
        }
    }

    #[test]
    fn test_bad_timestamp_segment() {
        let product = hash_fragment("p");
        let farmer = hash_fragment("f");
        for timestamp in ["", "!!", "ZZZZZZZZZZZZZZZZZZZZ", "+1"] {
            let raw = format!("S2S-{timestamp}-{product}-{farmer}");
            let result = verify(&raw, "p", "f");
            assert_eq!(result.rejection(), Some(RejectionReason::InvalidTimestamp), "{raw:?}");
        }
    }

    #[test]
    fn test_lowercase_fragments_do_not_match() {
        // md5("p") starts 83878c, so lowering changes the fragment
        let id = TraceabilityId::compose("p", "f", T);
        let lowered = format!(
            "S2S-{}-{}-{}",
            id.timestamp_segment(),
            id.product_fragment().to_lowercase(),
            id.farmer_fragment()
        );
        let result = verify(&lowered, "p", "f");
        assert_eq!(result.rejection(), Some(RejectionReason::ProductMismatch));
    }

    #[test]
    fn test_verify_many_keeps_order() {
        let good = TraceabilityId::compose("p1", "f1", T).into_inner();
        let requests = vec![
            VerificationRequest {
                traceability_id: good.clone(),
                product_id: "p1".to_string(),
                farmer_id: "f1".to_string(),
            },
            VerificationRequest {
                traceability_id: good,
                product_id: "p2".to_string(),
                farmer_id: "f1".to_string(),
            },
        ];

        let results = verify_many(&requests);
        assert!(results[0].is_valid());
        assert!(!results[1].is_valid());
    }
}
