//! Shamba Verify: check a traceability identifier against its product and farmer
//!
//! Verification recomputes the two MD5 fragments from the keys the caller
//! supplies and compares them byte for byte with the ones embedded in the
//! identifier. It never returns an error; every failure is a
//! [`VerificationResult::Rejected`] carrying a [`RejectionReason`].
//!
//! # Example
//!
//! ```
//! use shamba_core::TraceabilityId;
//! use shamba_verify::{verify, RejectionReason};
//!
//! let id = TraceabilityId::compose("prod-001", "farmer-042", 1_704_067_200_000);
//! assert!(verify(id.as_str(), "prod-001", "farmer-042").is_valid());
//!
//! let forged = verify(id.as_str(), "prod-999", "farmer-042");
//! assert_eq!(forged.rejection(), Some(RejectionReason::ProductMismatch));
//!
//! let garbage = verify("not-a-valid-id", "prod-001", "farmer-042");
//! assert_eq!(garbage.reason(), "Invalid traceability ID format");
//! ```

pub mod verdict;
pub mod verifier;

pub use verdict::{RejectionReason, VerificationReport, VerificationResult, VERIFIED_REASON};
pub use verifier::{verify, verify_many, VerificationRequest};
