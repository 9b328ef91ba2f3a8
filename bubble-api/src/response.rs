//! Data API response types.
//!
//! GET responses from the Data API wrap the page in a `response` envelope:
//! ```json
//! { "response": { "results": [...], "count": 100, "remaining": 250 } }
//! ```
//! Write and delete responses have no fixed shape and are passed through
//! to the caller unmodified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope wrapping every Data API GET response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope {
    /// The page of records carried by this response.
    pub response: RecordPage,
}

/// One page of records for a data type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPage {
    /// Records in this page, in provider-defined order.
    #[serde(default)]
    pub results: Vec<Value>,
    /// Number of records in this page.
    #[serde(default)]
    pub count: u64,
    /// Records matching the query beyond this page.
    #[serde(default)]
    pub remaining: u64,
}

impl RecordPage {
    /// Total records matching the query, as reported by this page.
    pub fn total(&self) -> u64 {
        self.count + self.remaining
    }

    /// Whether this page is the last one for its query.
    pub fn is_last(&self) -> bool {
        self.remaining == 0
    }
}
