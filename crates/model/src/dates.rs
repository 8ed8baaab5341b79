//! Date recognition for x-axis values.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses the date forms a dashboard usually hands over for month axes.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    // "2025-03" month precision
    if text.len() == 7 {
        return NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d").ok();
    }
    None
}

/// Interprets a number as epoch milliseconds, the encoding used for date axes.
pub fn from_epoch_millis(ms: f64) -> Option<NaiveDate> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64).map(|dt| dt.date_naive())
}

/// Short month-year label, e.g. `Feb 2025`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
