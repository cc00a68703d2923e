//! Display formatting of derived simulation values.
//!
//! These strings are presentation-only recomputations; nothing here is
//! persisted.

use chrono::DateTime;

/// Formats like C's `%.5e`: five mantissa decimals, signed two-digit exponent.
///
/// `1.2096809e-4` becomes `1.20968e-04`.
pub fn format_scientific(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{value:.5e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => rendered,
    }
}

/// Fixed-point with five decimals.
pub fn format_fixed(value: f64) -> String {
    format!("{value:.5}")
}

/// Renders epoch milliseconds as `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|moment| moment.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::{format_fixed, format_scientific, format_timestamp};

    #[test]
    fn scientific_matches_c_style_exponent() {
        assert_eq!(format_scientific(std::f64::consts::LN_2 / 5730.0), "1.20968e-04");
        assert_eq!(format_scientific(0.0864), "8.64000e-02");
        assert_eq!(format_scientific(12345.678), "1.23457e+04");
        assert_eq!(format_scientific(0.0), "0.00000e+00");
    }

    #[test]
    fn fixed_uses_five_decimals() {
        assert_eq!(format_fixed(50.0), "50.00000");
        assert_eq!(format_fixed(1.0 / 3.0), "0.33333");
    }

    #[test]
    fn timestamp_is_utc_seconds_precision() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(1_700_000_000_999), "2023-11-14 22:13:20");
    }
}
