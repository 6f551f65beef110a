//! Summary counters for the stat panel.
//!
//! Computed over the UNFILTERED inspection set — unlike the trend chart,
//! the panel always shows all-time numbers.

use serde::Serialize;

use crate::models::defect::Defect;
use crate::models::inspection::{Inspection, InspectionResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityStats {
    pub total_inspections: u64,
    pub pass_count: u64,
    pub fail_count: u64,
    pub defect_count: u64,
    /// pass_count / total_inspections × 100, one decimal; 0 when empty.
    pub pass_rate: f64,
}

pub fn compute(inspections: &[Inspection], defects: &[Defect]) -> QualityStats {
    let total = inspections.len() as u64;
    let pass = inspections.iter().filter(|i| i.passed()).count() as u64;
    let fail = inspections
        .iter()
        .filter(|i| i.result == InspectionResult::Fail)
        .count() as u64;

    let pass_rate = if total == 0 {
        0.0
    } else {
        (pass as f64 / total as f64 * 1000.0).round() / 10.0
    };

    QualityStats {
        total_inspections: total,
        pass_count: pass,
        fail_count: fail,
        defect_count: defects.len() as u64,
        pass_rate,
    }
}
