//! Upstream QC API records and their lenient deserializers.
//!
//! The upstream backend is a thin CRUD layer over a SQL database; field
//! formats are not guaranteed (dates may arrive as RFC 3339, as bare
//! `YYYY-MM-DD HH:MM:SS`, or malformed; prices as numbers or strings).
//! Deserialization never fails on a bad field — bad values coerce to
//! `None` and downstream stages skip them.

pub mod defect;
pub mod inspection;
pub mod product;
pub mod user;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a timestamp field that may be an RFC 3339 string, a SQL
/// datetime string, a bare date, an epoch-milliseconds number, or garbage.
/// Anything unparseable becomes `None`.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_datetime(&s),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        })
}

/// Deserialize a numeric field that may arrive as a JSON number or as a
/// numeric string. Non-numeric values become `None`.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
