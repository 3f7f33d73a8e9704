//! Creditor and debtor blocks of the QR-bill.

use serde::Serialize;

use crate::core::{PayloadError, countries, rules};

/// Structured or combined postal address of a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
enum Address {
    Structured {
        street: Option<String>,
        house_number: Option<String>,
        zip: String,
        city: String,
    },
    Combined {
        line1: Option<String>,
        line2: String,
    },
}

/// A payment party: name plus a structured or combined address.
///
/// Every text field is held to the payment character set and the
/// per-field length caps of the QR-bill standard; embedded line breaks
/// are stripped at construction because the serialized block is
/// line-oriented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    name: String,
    country: String,
    address: Address,
}

impl Contact {
    /// Party with a structured address (street / number / zip / city).
    pub fn structured(
        name: &str,
        street: Option<&str>,
        house_number: Option<&str>,
        zip: &str,
        city: &str,
        country: &str,
    ) -> Result<Self, PayloadError> {
        let name = check_text("name", name, 70, true)?;
        let street = match street {
            Some(street) => Some(check_text("street", street, 70, false)?),
            None => None,
        };
        let house_number = match house_number {
            Some(number) => Some(check_text("house number", number, 16, false)?),
            None => None,
        };
        let zip = check_text("zip code", zip, 16, true)?;
        let city = check_text("city", city, 35, true)?;
        Ok(Self {
            name,
            country: check_country(country)?,
            address: Address::Structured {
                street,
                house_number,
                zip,
                city,
            },
        })
    }

    /// Party with a two-line combined address; the second line (zip and
    /// city) is mandatory.
    pub fn combined(
        name: &str,
        line1: Option<&str>,
        line2: &str,
        country: &str,
    ) -> Result<Self, PayloadError> {
        let name = check_text("name", name, 70, true)?;
        let line1 = match line1 {
            Some(line) => Some(check_text("address line 1", line, 70, false)?),
            None => None,
        };
        let line2 = check_text("address line 2", line2, 70, true)?;
        Ok(Self {
            name,
            country: check_country(country)?,
            address: Address::Combined { line1, line2 },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// The seven payload lines of an address block: address type, name,
    /// street or line 1, house number or line 2, zip, city, country.
    pub(crate) fn to_lines(&self) -> [String; 7] {
        match &self.address {
            Address::Structured {
                street,
                house_number,
                zip,
                city,
            } => [
                "S".into(),
                self.name.clone(),
                street.clone().unwrap_or_default(),
                house_number.clone().unwrap_or_default(),
                zip.clone(),
                city.clone(),
                self.country.clone(),
            ],
            Address::Combined { line1, line2 } => [
                "K".into(),
                self.name.clone(),
                line1.clone().unwrap_or_default(),
                line2.clone(),
                String::new(),
                String::new(),
                self.country.clone(),
            ],
        }
    }
}

fn check_text(
    field: &str,
    value: &str,
    max: usize,
    mandatory: bool,
) -> Result<String, PayloadError> {
    let value = value.trim().replace(['\n', '\r'], "");
    if mandatory {
        rules::check_not_empty(field, &value)?;
    }
    rules::check_len(field, &value, max)?;
    rules::check_payment_charset(field, &value)?;
    Ok(value)
}

fn check_country(country: &str) -> Result<String, PayloadError> {
    let country = country.trim().to_uppercase();
    if !countries::is_known_country_code(&country) {
        return Err(PayloadError::Validation(format!(
            "country code '{country}' is not a valid ISO 3166-1 alpha-2 code"
        )));
    }
    Ok(country)
}
