//! Time-window filtering and per-day pass/fail bucketing for the trend chart.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::inspection::Inspection;

/// The chart is not horizontally scrollable, so the series is capped.
const MAX_CHART_BUCKETS: usize = 10;

/// Trailing time window selected by the view layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "7")]
    Last7Days,
    #[serde(rename = "30")]
    Last30Days,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeWindow {
    fn trailing_days(self) -> Option<i64> {
        match self {
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::All => None,
        }
    }
}

/// One calendar day's pass/fail tally, keyed by its chart label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    pub date_label: String,
    pub pass: u32,
    pub fail: u32,
}

/// Keep inspections whose date falls within the trailing window, boundary
/// inclusive. `All` passes everything through unchanged. Undated
/// inspections are dropped by the trailing windows (they cannot be placed
/// in time) but survive `All`; bucketing skips them either way.
pub fn filter_by_window(
    inspections: &[Inspection],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<Inspection> {
    let Some(days) = window.trailing_days() else {
        return inspections.to_vec();
    };
    let cutoff = now - Duration::days(days);
    inspections
        .iter()
        .filter(|i| i.inspection_date.is_some_and(|d| d >= cutoff))
        .cloned()
        .collect()
}

/// Group inspections by calendar day and tally pass/fail per bucket.
///
/// The bucket key is (month, day) without the year, matching the chart
/// label, so the same month/day in different years lands in one bucket.
/// Output is sorted ascending by (month, day) and truncated to the most
/// recent [`MAX_CHART_BUCKETS`], oldest dropped first.
pub fn bucket_by_date(inspections: &[Inspection]) -> Vec<DateBucket> {
    let mut buckets: HashMap<(u32, u32), DateBucket> = HashMap::new();
    for inspection in inspections {
        let Some(date) = inspection.inspection_date else {
            continue;
        };
        let bucket = buckets
            .entry((date.month(), date.day()))
            .or_insert_with(|| DateBucket {
                date_label: date.format("%b %-d").to_string(),
                pass: 0,
                fail: 0,
            });
        if inspection.passed() {
            bucket.pass += 1;
        } else {
            bucket.fail += 1;
        }
    }

    let mut keyed: Vec<((u32, u32), DateBucket)> = buckets.into_iter().collect();
    keyed.sort_by_key(|(key, _)| *key);
    let mut series: Vec<DateBucket> = keyed.into_iter().map(|(_, bucket)| bucket).collect();
    if series.len() > MAX_CHART_BUCKETS {
        series.drain(..series.len() - MAX_CHART_BUCKETS);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inspection::InspectionResult;
    use chrono::TimeZone;

    fn inspection(id: i64, date: Option<DateTime<Utc>>, result: InspectionResult) -> Inspection {
        Inspection {
            id,
            product_id: 1,
            inspector_id: 1,
            inspection_date: date,
            result,
            notes: None,
            photo_url: None,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn window_keeps_trailing_days_boundary_inclusive() {
        let now = at(2024, 5, 10);
        let set = vec![
            inspection(1, Some(now - Duration::days(7)), InspectionResult::Pass),
            inspection(2, Some(now - Duration::days(8)), InspectionResult::Pass),
            inspection(3, Some(now), InspectionResult::Fail),
        ];
        let kept = filter_by_window(&set, TimeWindow::Last7Days, now);
        let ids: Vec<i64> = kept.iter().map(|i| i.id).collect();
        // Exactly 7 days ago is kept; 8 days ago is not.
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn all_window_is_a_passthrough() {
        let now = at(2024, 5, 10);
        let set = vec![
            inspection(1, Some(at(2020, 1, 1)), InspectionResult::Pass),
            inspection(2, None, InspectionResult::Fail),
        ];
        assert_eq!(filter_by_window(&set, TimeWindow::All, now).len(), 2);
    }

    #[test]
    fn window_filter_is_idempotent() {
        let now = at(2024, 5, 10);
        let set: Vec<Inspection> = (0..20)
            .map(|n| {
                inspection(
                    n,
                    Some(now - Duration::days(n)),
                    InspectionResult::Pass,
                )
            })
            .collect();
        let once = filter_by_window(&set, TimeWindow::Last7Days, now);
        let twice = filter_by_window(&once, TimeWindow::Last7Days, now);
        let ids = |v: &[Inspection]| v.iter().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn buckets_tally_and_sort_by_day() {
        // 3 inspections on May 1 (2 pass, 1 fail), 2 on May 2 (2 fail).
        let set = vec![
            inspection(1, Some(at(2024, 5, 1)), InspectionResult::Pass),
            inspection(2, Some(at(2024, 5, 1)), InspectionResult::Pass),
            inspection(3, Some(at(2024, 5, 1)), InspectionResult::Fail),
            inspection(4, Some(at(2024, 5, 2)), InspectionResult::Fail),
            inspection(5, Some(at(2024, 5, 2)), InspectionResult::Fail),
        ];
        let series = bucket_by_date(&set);
        assert_eq!(
            series,
            vec![
                DateBucket {
                    date_label: "May 1".to_string(),
                    pass: 2,
                    fail: 1
                },
                DateBucket {
                    date_label: "May 2".to_string(),
                    pass: 0,
                    fail: 2
                },
            ]
        );
    }

    #[test]
    fn bucket_counts_cover_every_filtered_inspection() {
        // Sum of pass+fail over all buckets equals the filtered count.
        // Holds because the set spans fewer than MAX_CHART_BUCKETS days;
        // truncation would drop the oldest days' counts.
        let now = at(2024, 5, 10);
        let set: Vec<Inspection> = (0..30)
            .map(|n| {
                inspection(
                    n,
                    Some(now - Duration::days(n % 5)),
                    if n % 3 == 0 {
                        InspectionResult::Pass
                    } else {
                        InspectionResult::Fail
                    },
                )
            })
            .collect();
        let filtered = filter_by_window(&set, TimeWindow::Last7Days, now);
        let series = bucket_by_date(&filtered);
        let tally: u32 = series.iter().map(|b| b.pass + b.fail).sum();
        assert_eq!(tally as usize, filtered.len());
    }

    #[test]
    fn series_is_truncated_to_most_recent_ten_days() {
        let set: Vec<Inspection> = (1..=15)
            .map(|d| inspection(d.into(), Some(at(2024, 5, d)), InspectionResult::Pass))
            .collect();
        let series = bucket_by_date(&set);
        assert_eq!(series.len(), 10);
        // Oldest days dropped first.
        assert_eq!(series[0].date_label, "May 6");
        assert_eq!(series[9].date_label, "May 15");
    }

    #[test]
    fn non_pass_results_count_as_fail() {
        let set = vec![inspection(
            1,
            Some(at(2024, 5, 1)),
            InspectionResult::Unknown,
        )];
        let series = bucket_by_date(&set);
        assert_eq!(series[0].fail, 1);
        assert_eq!(series[0].pass, 0);
    }

    #[test]
    fn undated_inspections_never_reach_a_bucket() {
        let set = vec![
            inspection(1, None, InspectionResult::Pass),
            inspection(2, Some(at(2024, 5, 1)), InspectionResult::Pass),
        ];
        let series = bucket_by_date(&set);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].pass, 1);
    }

    #[test]
    fn same_month_day_across_years_share_a_bucket() {
        // Known source behavior, kept on purpose: the label has no year.
        let set = vec![
            inspection(1, Some(at(2023, 5, 1)), InspectionResult::Pass),
            inspection(2, Some(at(2024, 5, 1)), InspectionResult::Fail),
        ];
        let series = bucket_by_date(&set);
        assert_eq!(series.len(), 1);
        assert_eq!((series[0].pass, series[0].fail), (1, 1));
    }

    #[test]
    fn window_token_parses_from_query_strings() {
        #[derive(Deserialize)]
        struct Params {
            window: TimeWindow,
        }
        let p: Params = serde_json::from_str(r#"{"window": "7"}"#).unwrap();
        assert_eq!(p.window, TimeWindow::Last7Days);
        let p: Params = serde_json::from_str(r#"{"window": "all"}"#).unwrap();
        assert_eq!(p.window, TimeWindow::All);
        assert!(serde_json::from_str::<Params>(r#"{"window": "90"}"#).is_err());
    }
}
