//! The fixed set of currencies the converter offers.

use anyhow::{Result, bail};

/// Supported currency codes with display names. The converter works with
/// exactly this closed list; the rate provider may know more codes, but
/// the selection UI never offers them.
pub const SUPPORTED_CURRENCIES: &[(&str, &str)] = &[
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("AUD", "Australian Dollar"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CNY", "Chinese Yuan"),
    ("INR", "Indian Rupee"),
    ("NZD", "New Zealand Dollar"),
];

/// Returns true if `code` (case-insensitive) is in the supported list.
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_CURRENCIES
        .iter()
        .any(|(c, _)| c.eq_ignore_ascii_case(code.trim()))
}

/// Normalizes a user-entered code to its canonical uppercase form, or
/// fails with the list of valid codes.
pub fn parse_code(code: &str) -> Result<String> {
    let trimmed = code.trim();
    if !is_supported(trimmed) {
        let supported: Vec<&str> = SUPPORTED_CURRENCIES.iter().map(|(c, _)| *c).collect();
        bail!(
            "Unsupported currency code '{}'. Supported codes: {}",
            trimmed,
            supported.join(", ")
        );
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_codes() {
        assert!(is_supported("USD"));
        assert!(is_supported("inr"));
        assert!(is_supported(" eur "));
        assert!(!is_supported("BTC"));
        assert!(!is_supported(""));
    }

    #[test]
    fn test_parse_code_normalizes() {
        assert_eq!(parse_code("usd").unwrap(), "USD");
        assert_eq!(parse_code(" Jpy ").unwrap(), "JPY");
    }

    #[test]
    fn test_parse_code_rejects_unknown() {
        let err = parse_code("XYZ").unwrap_err().to_string();
        assert!(err.contains("Unsupported currency code 'XYZ'"));
        assert!(err.contains("USD"));
        assert!(err.contains("NZD"));
    }
}
