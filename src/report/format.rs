//! Brazilian number formatting: `.` groups thousands, `,` separates decimals.

pub fn format_decimal(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    // No "-0,00": the sign is kept only when a non-zero digit is printed.
    let negative = value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{fraction}")
    }
}

pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_decimal(value, 2))
}

/// Formats a rate that is already expressed in percent, e.g. `2.0` -> `2,0%`.
pub fn format_rate_percent(percent: f64) -> String {
    format!("{}%", format_decimal(percent, 1))
}

/// Formats a fraction as a percentage, e.g. `0.0597` -> `5,97%`.
pub fn format_fraction_percent(fraction: f64) -> String {
    format!("{}%", format_decimal(fraction * 100.0, 2))
}
