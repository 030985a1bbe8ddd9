//! Display helpers shared by the views and the CLI.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::roles::Role;

/// en-US dollars with thousands separators; `None` shows as `$0.00`.
pub fn format_currency(amount: Option<f64>) -> String {
    let amount = amount.filter(|a| a.is_finite()).unwrap_or(0.0);
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// `Oct 18, 2026` style. Accepts RFC 3339, a naive timestamp or a bare date.
pub fn format_date(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "N/A".to_string();
    };
    match parse_day(value) {
        Some(day) => day.format("%b %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

pub(crate) fn parse_day(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn status_color(status: &str) -> &'static str {
    match status {
        "pending" | "reserved" => "#FF9800",
        "confirmed" => "#2196F3",
        "processing" | "sold" => "#9C27B0",
        "completed" | "available" => "#4CAF50",
        "cancelled" | "expired" => "#F44336",
        _ => "#757575",
    }
}

pub fn role_display_name(role: &str) -> String {
    role.parse::<Role>()
        .map(|r| r.display_name().to_string())
        .unwrap_or_else(|_| role.to_string())
}
