//! Price Formatting

/// Format a price as `<symbol> 1,234,567.89`
pub fn format_currency(symbol: &str, value: f64) -> String {
    if !value.is_finite() {
        return format!("{} {}", symbol, value);
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{} {}{}.{}", symbol, sign, group_thousands(whole), fraction)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_currency("\u{20b9}", 1_234_567.891), "\u{20b9} 1,234,567.89");
        assert_eq!(format_currency("$", 999.0), "$ 999.00");
        assert_eq!(format_currency("$", 1_000.0), "$ 1,000.00");
        assert_eq!(format_currency("$", 0.004), "$ 0.00");
    }

    #[test]
    fn test_rounding_carries_into_groups() {
        assert_eq!(format_currency("$", 999_999.999), "$ 1,000,000.00");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_currency("$", -12_345.5), "$ -12,345.50");
        assert_eq!(format_currency("$", -0.001), "$ 0.00");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_currency("$", f64::NAN), "$ NaN");
    }
}
