//! Parsing and formatting of the numeric form fields.
//!
//! Form inputs are kept as text; blank or malformed text is simply "absent".

/// Parses user input into a number.
///
/// Accepts surrounding whitespace and `,` thousands separators. Returns `None`
/// for blank, malformed or non-finite input.
pub fn parse_number(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parsed value, with zero folded into "absent".
pub fn parse_nonzero(input: &str) -> Option<f64> {
    parse_number(input).filter(|v| *v != 0.0)
}

/// Rounds half away from zero to 2 decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `25` -> `"25.00"`. Negative zero prints as `"0.00"`.
pub fn format_decimal2(value: f64) -> String {
    let rounded = round2(value);
    if rounded == 0.0 {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

/// Quantity without trailing zeros: `100.0` -> `"100"`, `2.50` -> `"2.5"`.
pub fn format_quantity(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// `Some(12.5)` -> `"12.50"`, `None` -> `""`.
pub fn fmt_money(value: Option<f64>) -> String {
    value.map(format_decimal2).unwrap_or_default()
}

/// Quantity with its unit, either part may be missing.
pub fn fmt_qty_unit(quantity: Option<f64>, unit: Option<&str>) -> String {
    let unit = unit.map(str::trim).unwrap_or("");
    match quantity {
        None => unit.to_string(),
        Some(q) => format!("{} {}", format_quantity(q), unit).trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("10"), Some(10.0));
        assert_eq!(parse_number("  2.5 "), Some(2.5));
        assert_eq!(parse_number("1,234.50"), Some(1234.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_parse_nonzero() {
        assert_eq!(parse_nonzero("0"), None);
        assert_eq!(parse_nonzero("0.00"), None);
        assert_eq!(parse_nonzero("3"), Some(3.0));
    }

    #[test]
    fn test_format_decimal2() {
        assert_eq!(format_decimal2(25.0), "25.00");
        assert_eq!(format_decimal2(0.125), "0.13");
        assert_eq!(format_decimal2(-0.0), "0.00");
        assert_eq!(format_decimal2(1234.5), "1234.50");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(100.0), "100");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn test_fmt_qty_unit() {
        assert_eq!(fmt_qty_unit(None, None), "");
        assert_eq!(fmt_qty_unit(None, Some(" MT ")), "MT");
        assert_eq!(fmt_qty_unit(Some(12.0), Some("MT")), "12 MT");
        assert_eq!(fmt_qty_unit(Some(12.5), None), "12.5");
        assert_eq!(fmt_money(None), "");
        assert_eq!(fmt_money(Some(12.5)), "12.50");
    }
}
