//! Conversion screen state and the amount arithmetic.

/// Everything the conversion view renders. `amount` stays a string so the
/// user's exact input (including partial or invalid text) is preserved;
/// `converted_amount` is a preformatted string so the display never
/// re-rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionState {
    pub amount: String,
    pub from_currency: String,
    pub to_currency: String,
    pub converted_amount: String,
    pub rate: f64,
    pub loading: bool,
}

impl Default for ConversionState {
    fn default() -> Self {
        Self {
            amount: "1".to_string(),
            from_currency: "INR".to_string(),
            to_currency: "USD".to_string(),
            converted_amount: "0".to_string(),
            rate: 1.0,
            loading: false,
        }
    }
}

/// Computes `amount * rate` rounded half-up to two decimal places.
///
/// Non-numeric or non-finite input yields `"0"` rather than an error;
/// typing a partial number must never interrupt the user.
pub fn convert(amount: &str, rate: f64) -> String {
    let Ok(value) = amount.trim().parse::<f64>() else {
        return "0".to_string();
    };
    let product = value * rate;
    if !product.is_finite() {
        return "0".to_string();
    }
    // f64::round is round-half-away-from-zero; {:.2} alone would round
    // half-to-even and turn 0.125 into "0.12".
    let rounded = (product * 100.0).round() / 100.0;
    if !rounded.is_finite() {
        // Scaling by 100 overflowed. A product this large has no
        // fractional part in f64, so two-decimal rounding is the
        // identity and the product can be rendered directly.
        return format!("{product:.2}");
    }
    format!("{rounded:.2}")
}
