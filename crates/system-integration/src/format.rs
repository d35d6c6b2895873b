//! Display formatting shared by the page and the exported utilities

use chrono::NaiveDateTime;

/// Format with en-US digit grouping and exactly `decimals` fraction digits.
///
/// `1234.5` with 2 decimals becomes `1,234.50`.
pub fn format_number(num: f64, decimals: usize) -> String {
    if num.is_nan() {
        return "NaN".to_string();
    }
    if num.is_infinite() {
        return if num > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.*}", decimals, num.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    if num < 0.0 {
        out.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Signed temperature with one decimal, e.g. `+3.2°C`
pub fn format_temperature(temp: f64) -> String {
    // Negative zero prints as "+0.0"
    let temp = if temp == 0.0 { 0.0 } else { temp };
    let sign = if temp >= 0.0 { "+" } else { "" };
    format!("{sign}{temp:.1}°C")
}

/// en-US locale date and time, e.g. `3/7/2024, 2:05:09 PM`
pub fn format_locale_time(time: NaiveDateTime) -> String {
    time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
