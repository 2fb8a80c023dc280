//! Number formatting for the terminal view.

use num_format::{Locale, ToFormattedString};

/// Format a request quantity: thousands separators for whole numbers,
/// up to two decimals otherwise
pub fn quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9e15 {
        (value as i64).to_formatted_string(&Locale::en)
    } else {
        trim_decimals(value)
    }
}

/// Format a multiplier as `Nx`, trimming trailing zeros from the
/// fractional form (3 -> "3x", 0.33 -> "0.33x", 2.50 -> "2.5x")
pub fn multiplier(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}x", value as i64)
    } else {
        format!("{}x", trim_decimals(value))
    }
}

/// Format a currency amount as `$N.NN`
pub fn money(value: f64) -> String {
    format!("${value:.2}")
}

fn trim_decimals(value: f64) -> String {
    format!("{value:.2}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quantity_thousands_separator() {
        assert_eq!(quantity(0.0), "0");
        assert_eq!(quantity(260.0), "260");
        assert_eq!(quantity(1500.0), "1,500");
        assert_eq!(quantity(1234567.0), "1,234,567");
    }

    #[test]
    fn test_quantity_fractional() {
        assert_eq!(quantity(10.5), "10.5");
        assert_eq!(quantity(0.33), "0.33");
    }

    #[test]
    fn test_multiplier_formats() {
        assert_eq!(multiplier(0.0), "0x");
        assert_eq!(multiplier(1.0), "1x");
        assert_eq!(multiplier(3.0), "3x");
        assert_eq!(multiplier(0.33), "0.33x");
        assert_eq!(multiplier(2.5), "2.5x");
        assert_eq!(multiplier(1.0 / 3.0), "0.33x");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(8.0), "$8.00");
        assert_eq!(money(2.345), "$2.35");
    }
}
