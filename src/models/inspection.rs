//! Inspection record: one pass/fail quality check of a product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient_datetime;

/// Outcome of an inspection. Anything the upstream sends that is not
/// `pass`/`fail` lands in `Unknown` and is treated as "not pass".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionResult {
    Pass,
    Fail,
    #[serde(other)]
    Unknown,
}

/// Inspection as returned by `GET /inspections`. Immutable once fetched;
/// the pipeline only derives summaries from it.
#[derive(Debug, Clone, Deserialize)]
pub struct Inspection {
    pub id: i64,
    pub product_id: i64,
    pub inspector_id: i64,
    /// `None` when the upstream value is missing or unparseable; such
    /// inspections are excluded from date bucketing.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub inspection_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub result: InspectionResult,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

impl Default for InspectionResult {
    fn default() -> Self {
        Self::Unknown
    }
}

impl Inspection {
    pub fn passed(&self) -> bool {
        self.result == InspectionResult::Pass
    }
}
