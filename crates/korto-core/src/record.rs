use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A persisted mapping from a short code to its long URL.
///
/// Records are created once by the allocator and never updated: the
/// `long_url` of a stored `id` does not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortUrlRecord {
    /// The short code, used as the primary key.
    pub id: ShortCode,
    /// The original URL that was shortened.
    pub long_url: String,
    /// When the record was first committed.
    pub created_at: Timestamp,
}

impl ShortUrlRecord {
    /// Creates a record stamped with the current time.
    pub fn new(id: ShortCode, long_url: impl Into<String>) -> Self {
        Self {
            id,
            long_url: long_url.into(),
            created_at: Timestamp::now(),
        }
    }
}
