use chrono::NaiveDate;

use crate::models::Numeric;

/// Placeholder shown for unset values in detail views
pub const NOT_AVAILABLE: &str = "N/A";

/// Currency prefix for all amounts
pub const CURRENCY: &str = "KES";

/// Case-insensitive substring test
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Format a Kenyan phone number for display
/// 254XXXXXXXXX -> +254 XXX XXXXXX, 07XXXXXXXX -> 07XX XXXXXX
pub fn format_phone(phone: &str) -> String {
    if phone.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    if phone.starts_with("254") && phone.len() > 6 && phone.is_ascii() {
        return format!("+{} {} {}", &phone[0..3], &phone[3..6], &phone[6..]);
    }
    if (phone.starts_with("07") || phone.starts_with("01")) && phone.len() > 4 && phone.is_ascii() {
        return format!("{} {}", &phone[0..4], &phone[4..]);
    }
    phone.to_string()
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None or empty
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    if date.trim().is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return dt.format("%b %d, %Y").to_string();
    }
    let day: String = date.chars().take(10).collect();
    match NaiveDate::parse_from_str(&day, "%Y-%m-%d") {
        Ok(d) => d.format("%b %d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Group the integer part with thousands separators: 1234567 -> "1,234,567"
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format an amount with separators and at most two decimals
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(&(cents / 100).to_string());
    let frac = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if frac == 0 {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{:02}", sign, whole, frac)
    }
}

/// Format an amount as currency, e.g. "KES 10,000"
pub fn format_currency(amount: f64) -> String {
    format!("{} {}", CURRENCY, format_amount(amount))
}

/// Currency for a stored amount; unset or non-numeric amounts show as "N/A"
pub fn format_stored_currency(amount: &Numeric) -> String {
    match amount.number() {
        Some(n) => format_currency(n),
        None => NOT_AVAILABLE.to_string(),
    }
}
