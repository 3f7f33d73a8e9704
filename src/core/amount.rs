//! Monetary amounts with the range and precision payment QR schemes accept.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::currencies;
use super::error::PayloadError;

/// A decimal amount paired with its ISO 4217 currency.
///
/// Invariant: 0.01 ≤ value ≤ 999,999,999.99 with at most two fraction
/// digits, checked once at construction. Rendering is locale
/// independent; the comma/point choice is an explicit method, never an
/// ambient setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonetaryAmount {
    value: Decimal,
    currency: String,
}

impl MonetaryAmount {
    pub fn new(value: Decimal, currency: &str) -> Result<Self, PayloadError> {
        let currency = currency.trim().to_uppercase();
        if !currencies::is_known_currency_code(&currency) {
            return Err(PayloadError::Validation(format!(
                "currency code '{currency}' is not a known ISO 4217 code"
            )));
        }
        check_amount(value)?;
        Ok(Self { value, currency })
    }

    /// Parse a decimal text that may use either ',' or '.' as separator.
    pub fn parse(text: &str, currency: &str) -> Result<Self, PayloadError> {
        let normalized = text.trim().replace(',', ".");
        let value = normalized.parse::<Decimal>().map_err(|_| {
            PayloadError::Validation(format!("'{text}' is not a decimal amount"))
        })?;
        Self::new(value, currency)
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Render with '.' decimal separator and exactly two fraction digits.
    pub fn to_point_string(&self) -> String {
        format_point(self.value)
    }

    /// Render with ',' decimal separator and exactly two fraction digits.
    pub fn to_comma_string(&self) -> String {
        format_point(self.value).replace('.', ",")
    }
}

/// Range and precision check shared by every scheme.
pub fn check_amount(value: Decimal) -> Result<(), PayloadError> {
    if value.normalize().scale() > 2 {
        return Err(PayloadError::Validation(format!(
            "amount {value} must not have more than 2 digits after the decimal point"
        )));
    }
    if value < dec!(0.01) || value > dec!(999999999.99) {
        return Err(PayloadError::Validation(format!(
            "amount {value} must be at least 0.01 and at most 999999999.99"
        )));
    }
    Ok(())
}

/// Locale-independent rendering with '.' and exactly two fraction digits.
pub fn format_point(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
