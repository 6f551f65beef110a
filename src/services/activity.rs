//! Recent-activity feed derived from the latest inspections and defects.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::defect::Defect;
use crate::models::inspection::Inspection;
use crate::upstream::DashboardSources;

/// Hard cap on the feed; inspection entries take priority over defects.
const MAX_ACTIVITY_ENTRIES: usize = 5;
/// At most this many defect entries are appended after inspections.
const MAX_DEFECT_ENTRIES: usize = 2;

const JUST_NOW: &str = "Just now";

/// One row in the activity feed, ready for the view layer.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub icon_key: String,
    pub severity_class: String,
    pub headline: String,
    pub detail: String,
    pub relative_time: String,
}

/// Build the feed: the 5 most recent inspections (joined against product
/// and inspector names), then up to 2 most recent defects. Defects carry
/// no timestamp upstream, so their recency is approximated by id order
/// and rendered as "Just now".
pub fn build_activity(sources: &DashboardSources, now: DateTime<Utc>) -> Vec<ActivityEntry> {
    let products: HashMap<i64, &str> = sources
        .products
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();
    let users: HashMap<i64, &str> = sources
        .users
        .iter()
        .map(|u| (u.id, u.name.as_str()))
        .collect();

    let mut recent: Vec<&Inspection> = sources.inspections.iter().collect();
    recent.sort_by_key(|i| Reverse(i.inspection_date));

    let mut entries: Vec<ActivityEntry> = recent
        .into_iter()
        .take(MAX_ACTIVITY_ENTRIES)
        .map(|inspection| inspection_entry(inspection, &products, &users, now))
        .collect();

    let mut recent_defects: Vec<&Defect> = sources.defects.iter().collect();
    recent_defects.sort_by_key(|d| Reverse(d.id));
    for defect in recent_defects.into_iter().take(MAX_DEFECT_ENTRIES) {
        entries.push(defect_entry(defect));
    }

    entries.truncate(MAX_ACTIVITY_ENTRIES);
    entries
}

fn inspection_entry(
    inspection: &Inspection,
    products: &HashMap<i64, &str>,
    users: &HashMap<i64, &str>,
    now: DateTime<Utc>,
) -> ActivityEntry {
    let product = products
        .get(&inspection.product_id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Product #{}", inspection.product_id));
    let inspector = users
        .get(&inspection.inspector_id)
        .copied()
        .unwrap_or("Inspector");
    let relative = inspection
        .inspection_date
        .map(|d| relative_time(d, now))
        .unwrap_or_else(|| JUST_NOW.to_string());

    let (icon_key, severity_class, verb) = if inspection.passed() {
        ("fa-check-circle", "success", "passed")
    } else {
        ("fa-times-circle", "danger", "failed")
    };

    ActivityEntry {
        icon_key: icon_key.to_string(),
        severity_class: severity_class.to_string(),
        headline: format!("Inspection {verb} for {product}"),
        detail: format!("By {inspector}"),
        relative_time: relative,
    }
}

fn defect_entry(defect: &Defect) -> ActivityEntry {
    let severity = defect
        .severity
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unspecified".to_string());
    ActivityEntry {
        icon_key: "fa-bug".to_string(),
        severity_class: "warning".to_string(),
        headline: format!("Defect reported: {}", defect.defect_type),
        detail: format!("Severity: {severity}"),
        relative_time: JUST_NOW.to_string(),
    }
}

/// Human-friendly elapsed-time label.
///
/// <1 min "Just now"; <60 min "{n} minute(s) ago"; <24 h "{n} hour(s)
/// ago"; a whole-day delta of 1 "Yesterday"; <7 days "{n} days ago";
/// otherwise the absolute date. Future dates render as "Just now".
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        JUST_NOW.to_string()
    } else if minutes < 60 {
        format!("{minutes} minute{} ago", plural(minutes))
    } else if hours < 24 {
        format!("{hours} hour{} ago", plural(hours))
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{days} days ago")
    } else {
        then.format("%-m/%-d/%Y").to_string()
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}
