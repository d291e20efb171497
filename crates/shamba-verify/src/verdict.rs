//! Verification results
//!
//! A verification never fails as an operation: a malformed or forged
//! identifier is a `Rejected` value, not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of checking an identifier against a product/farmer pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// Both hash fragments match
    Verified { issued_at_ms: u64 },

    /// The identifier does not belong to the pair, or is not an identifier at all
    Rejected {
        reason: RejectionReason,
        /// Present whenever the timestamp segment decoded
        issued_at_ms: Option<u64>,
    },
}

impl VerificationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    pub fn issued_at_ms(&self) -> Option<u64> {
        match self {
            Self::Verified { issued_at_ms } => Some(*issued_at_ms),
            Self::Rejected { issued_at_ms, .. } => *issued_at_ms,
        }
    }

    /// Issue time as a date. `None` when absent or beyond the representable range.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.issued_at_ms()?).ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Verified { .. } => None,
            Self::Rejected { reason, .. } => Some(*reason),
        }
    }

    /// Human-readable reason, `"Verified"` on success.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Verified { .. } => VERIFIED_REASON,
            Self::Rejected { reason, .. } => reason.message(),
        }
    }

    pub fn report(&self) -> VerificationReport {
        VerificationReport::from(self)
    }
}

pub const VERIFIED_REASON: &str = "Verified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Not four segments, or the first segment is not the prefix
    InvalidFormat,
    /// Timestamp segment is not base-36 or overflows
    InvalidTimestamp,
    ProductMismatch,
    FarmerMismatch,
}

impl RejectionReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "Invalid traceability ID format",
            Self::InvalidTimestamp => "Invalid timestamp segment",
            Self::ProductMismatch => "Product hash mismatch",
            Self::FarmerMismatch => "Farmer hash mismatch",
        }
    }

    /// Stable snake_case code, matching the serialised form.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "invalid_format",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::ProductMismatch => "product_mismatch",
            Self::FarmerMismatch => "farmer_mismatch",
        }
    }

    pub fn is_hash_mismatch(&self) -> bool {
        matches!(self, Self::ProductMismatch | Self::FarmerMismatch)
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Flat JSON view: `{ valid, reason, code?, timestamp? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub valid: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<RejectionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<&VerificationResult> for VerificationReport {
    fn from(result: &VerificationResult) -> Self {
        Self {
            valid: result.is_valid(),
            reason: result.reason().to_string(),
            code: result.rejection(),
            timestamp: result.issued_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report_for_verified() {
        let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let report = VerificationResult::Verified {
            issued_at_ms: 1_704_067_200_000,
        }
        .report();

        assert!(report.valid);
        assert_eq!(report.reason, "Verified");
        assert_eq!(report.code, None);
        assert_eq!(report.timestamp, Some(issued_at));
    }

    #[test]
    fn test_report_json_for_rejection() {
        let result = VerificationResult::Rejected {
            reason: RejectionReason::InvalidFormat,
            issued_at_ms: None,
        };
        let json = serde_json::to_value(result.report()).unwrap();

        assert_eq!(json["valid"], false);
        assert_eq!(json["reason"], "Invalid traceability ID format");
        assert_eq!(json["code"], RejectionReason::InvalidFormat.code());
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_out_of_range_timestamp_has_no_date() {
        let result = VerificationResult::Verified { issued_at_ms: u64::MAX };
        assert_eq!(result.issued_at_ms(), Some(u64::MAX));
        assert!(result.issued_at().is_none());
        assert!(result.report().timestamp.is_none());
    }

    #[test]
    fn test_hash_mismatch_classification() {
        assert!(RejectionReason::ProductMismatch.is_hash_mismatch());
        assert!(RejectionReason::FarmerMismatch.is_hash_mismatch());
        assert!(!RejectionReason::InvalidFormat.is_hash_mismatch());
        assert!(RejectionReason::FarmerMismatch.to_string().contains("hash mismatch"));
    }
}
