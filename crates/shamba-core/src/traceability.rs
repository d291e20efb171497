//! Traceability identifiers: `S2S-<base36 ms>-<product fragment>-<farmer fragment>`
//!
//! The hash fragments are the first six hex characters of an MD5 digest.
//! They are labels, not credentials: anyone holding the product and farmer
//! keys can mint a matching identifier.
use chrono::Utc;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TraceError};

/// Literal first segment of every identifier
pub const ID_PREFIX: &str = "S2S";
pub const SEGMENT_DELIMITER: char = '-';
pub const FRAGMENT_LEN: usize = 6;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Only built by [`TraceabilityId::compose`] or [`TraceabilityId::parse`];
/// deserialisation goes through `parse` as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TraceabilityId(String);

impl TraceabilityId {
    /// Deterministic for a given `(product_id, farmer_id, issued_at_ms)` triple.
    pub fn compose(product_id: &str, farmer_id: &str, issued_at_ms: u64) -> Self {
        let raw = format!(
            "{ID_PREFIX}{SEGMENT_DELIMITER}{}{SEGMENT_DELIMITER}{}{SEGMENT_DELIMITER}{}",
            to_base36(issued_at_ms),
            hash_fragment(product_id),
            hash_fragment(farmer_id),
        );
        Self(raw.to_uppercase())
    }

    pub fn compose_now(product_id: &str, farmer_id: &str) -> Self {
        Self::compose(product_id, farmer_id, now_millis())
    }

    /// Accept an identifier issued elsewhere. Checks shape only, not hashes.
    pub fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<&str> = raw.split(SEGMENT_DELIMITER).collect();
        if segments.len() != 4 || segments[0] != ID_PREFIX {
            return Err(TraceError::FormatError(format!(
                "expected {ID_PREFIX}-<timestamp>-<product>-<farmer>, got {raw:?}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    fn segment(&self, index: usize) -> &str {
        self.0.split(SEGMENT_DELIMITER).nth(index).unwrap_or_default()
    }

    pub fn timestamp_segment(&self) -> &str {
        self.segment(1)
    }

    pub fn product_fragment(&self) -> &str {
        self.segment(2)
    }

    pub fn farmer_fragment(&self) -> &str {
        self.segment(3)
    }

    /// Issue time in milliseconds, if the timestamp segment decodes.
    pub fn issued_at_ms(&self) -> Option<u64> {
        from_base36(self.timestamp_segment())
    }
}

impl fmt::Display for TraceabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TraceabilityId {
    type Error = TraceError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<TraceabilityId> for String {
    fn from(id: TraceabilityId) -> Self {
        id.0
    }
}

impl AsRef<str> for TraceabilityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// First six hex characters of `md5(value)`, upper-cased.
pub fn hash_fragment(value: &str) -> String {
    let digest = Md5::digest(value.as_bytes());
    let mut fragment = hex::encode(digest);
    fragment.truncate(FRAGMENT_LEN);
    fragment.make_ascii_uppercase();
    fragment
}

/// Lowercase base-36 rendering, `0` for zero.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(13);
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Case-insensitive base-36 parse. `None` on empty input, bad digits or overflow.
pub fn from_base36(segment: &str) -> Option<u64> {
    if segment.is_empty() || segment.starts_with('+') {
        return None;
    }
    u64::from_str_radix(segment, 36).ok()
}

pub fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
