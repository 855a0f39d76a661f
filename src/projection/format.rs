use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const MISSING: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";

/// Parses RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` and plain dates, all as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Short US-style date, `Jan 15, 2024`.
///
/// Empty input renders the placeholder; unparseable input renders `Invalid Date`.
pub fn format_date(raw: &str) -> String {
    format_date_or(raw, MISSING)
}

pub fn format_date_or(raw: &str, placeholder: &str) -> String {
    if raw.trim().is_empty() {
        return placeholder.to_string();
    }
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

pub fn format_optional_date(raw: Option<&str>, placeholder: &str) -> String {
    format_date_or(raw.unwrap_or_default(), placeholder)
}

/// Currency amount with thousands separators, `DZD 120,000.00`.
///
/// Missing and zero amounts render the placeholder.
pub fn format_price(amount: Option<f64>, currency: &str, placeholder: &str) -> String {
    let amount = match amount {
        Some(amount) if amount != 0.0 && amount.is_finite() => amount,
        _ => return placeholder.to_string(),
    };

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{} {}.{}", sign, currency, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
