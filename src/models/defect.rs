//! Defect record: a flaw tied to one inspection, with a severity tier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unspecified,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// Defect as returned by `GET /defects/{inspectionId}`. The upstream
/// schema carries no timestamp, so recency is approximated by id order.
#[derive(Debug, Clone, Deserialize)]
pub struct Defect {
    pub id: i64,
    pub inspection_id: i64,
    pub defect_type: String,
    pub description: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
}
