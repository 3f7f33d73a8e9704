//! Reusable field predicates shared by the payload encoders.
//!
//! Every check is pure and all-or-nothing: the first failing rule
//! aborts construction of the record, there is no partial state.

use chrono::{Local, NaiveDate};

use super::error::PayloadError;

/// Bounded character count (chars, not bytes — the standards count
/// characters).
pub fn check_len(field: &str, value: &str, max: usize) -> Result<(), PayloadError> {
    if value.chars().count() > max {
        return Err(PayloadError::Validation(format!(
            "{field} must not be longer than {max} characters"
        )));
    }
    Ok(())
}

pub fn check_not_empty(field: &str, value: &str) -> Result<(), PayloadError> {
    if value.trim().is_empty() {
        return Err(PayloadError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Digits-only value with a bounded length, for account and routing
/// numbers.
pub fn check_digits(field: &str, value: &str, min: usize, max: usize) -> Result<(), PayloadError> {
    let len = value.chars().count();
    if len < min || len > max || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PayloadError::Validation(format!(
            "{field} must consist of {min} to {max} digits"
        )));
    }
    Ok(())
}

/// Extended-Latin character set the payment schemes inherit from the
/// pain.001 message standard.
pub fn is_payment_char(c: char) -> bool {
    matches!(c,
        'a'..='z' | 'A'..='Z' | '0'..='9'
        | ' ' | '.' | ',' | ';' | ':' | '\'' | '+' | '-' | '/'
        | '(' | ')' | '?' | '*' | '[' | ']' | '{' | '}' | '\\' | '`' | '´' | '~'
        | '!' | '"' | '#' | '%' | '&' | '<' | '>' | '÷' | '=' | '@' | '_' | '$' | '£'
        | 'à' | 'á' | 'â' | 'ä' | 'ç' | 'è' | 'é' | 'ê' | 'ë' | 'ì' | 'í' | 'î' | 'ï'
        | 'ñ' | 'ò' | 'ó' | 'ô' | 'ö' | 'ù' | 'ú' | 'û' | 'ü' | 'ý' | 'ß'
        | 'À' | 'Á' | 'Â' | 'Ä' | 'Ç' | 'È' | 'É' | 'Ê' | 'Ë' | 'Ì' | 'Í' | 'Î' | 'Ï'
        | 'Ñ' | 'Ò' | 'Ó' | 'Ô' | 'Ö' | 'Ù' | 'Ú' | 'Û' | 'Ü'
    )
}

pub fn check_payment_charset(field: &str, value: &str) -> Result<(), PayloadError> {
    if let Some(bad) = value.chars().find(|c| !is_payment_char(*c)) {
        return Err(PayloadError::Validation(format!(
            "{field} contains '{bad}', which is outside the allowed payment character set"
        )));
    }
    Ok(())
}

/// Calendar-day check against the local date.
pub fn check_not_past(field: &str, date: NaiveDate) -> Result<(), PayloadError> {
    if date < today() {
        return Err(PayloadError::Validation(format!(
            "{field} must be today or in the future"
        )));
    }
    Ok(())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
