//! EPC credit-transfer QR payloads ("Girocode").
//!
//! A Girocode is a fixed-order, newline-separated record of twelve
//! fields opening with the service tag `BCD`. Transfers are always
//! denominated in EUR; the declared character set travels in field 3
//! and the payload can be re-encoded into it for symbol encoders that
//! take the declaration literally. The standard pins error correction
//! to level M.

use serde::Serialize;

use crate::core::{
    EccLevel, MonetaryAmount, Payload, PayloadError, RenderHints, checksum, rules, transcode,
};

/// Payload version field: `001` requires a BIC, `002` (EEA) tolerates
/// its absence at the point of payment but still records it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GirocodeVersion {
    V1,
    V2,
}

impl GirocodeVersion {
    fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "001",
            Self::V2 => "002",
        }
    }
}

/// Character set declared in field 3, with its single-digit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GirocodeCharset {
    Utf8,
    Iso8859_1,
    Iso8859_2,
    Iso8859_4,
    Iso8859_5,
    Iso8859_7,
    Iso8859_10,
    Iso8859_15,
}

impl GirocodeCharset {
    /// Single-digit code serialized into the payload.
    pub fn code(&self) -> u8 {
        match self {
            Self::Utf8 => 1,
            Self::Iso8859_1 => 2,
            Self::Iso8859_2 => 3,
            Self::Iso8859_4 => 4,
            Self::Iso8859_5 => 5,
            Self::Iso8859_7 => 6,
            Self::Iso8859_10 => 7,
            Self::Iso8859_15 => 8,
        }
    }

    fn encoding(&self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            // the WHATWG "iso-8859-1" label resolves to windows-1252,
            // byte-identical for the Latin-1 repertoire
            Self::Iso8859_1 => encoding_rs::WINDOWS_1252,
            Self::Iso8859_2 => encoding_rs::ISO_8859_2,
            Self::Iso8859_4 => encoding_rs::ISO_8859_4,
            Self::Iso8859_5 => encoding_rs::ISO_8859_5,
            Self::Iso8859_7 => encoding_rs::ISO_8859_7,
            Self::Iso8859_10 => encoding_rs::ISO_8859_10,
            Self::Iso8859_15 => encoding_rs::ISO_8859_15,
        }
    }
}

/// Remittance information — structured (ISO 11649) or free text, never
/// both on one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Remittance {
    /// Structured reference, at most 35 characters.
    Structured(String),
    /// Free text, at most 140 characters.
    Unstructured(String),
}

/// A validated Girocode record.
#[derive(Debug, Clone, Serialize)]
pub struct Girocode {
    version: GirocodeVersion,
    charset: GirocodeCharset,
    bic: String,
    name: String,
    iban: String,
    amount: MonetaryAmount,
    purpose: Option<String>,
    remittance: Option<Remittance>,
    message: Option<String>,
}

impl Girocode {
    pub fn builder(
        name: &str,
        iban: &str,
        bic: &str,
        amount: MonetaryAmount,
    ) -> GirocodeBuilder {
        GirocodeBuilder {
            version: GirocodeVersion::V1,
            charset: GirocodeCharset::Utf8,
            name: name.trim().to_string(),
            iban: iban.to_string(),
            bic: bic.to_string(),
            amount,
            purpose: None,
            remittance: None,
            message: None,
        }
    }

    /// Payload bytes in the declared character set.
    pub fn encode_charset_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        let text = self.encode()?;
        transcode::encode_exact(self.charset.encoding(), &text)
    }
}

pub struct GirocodeBuilder {
    version: GirocodeVersion,
    charset: GirocodeCharset,
    name: String,
    iban: String,
    bic: String,
    amount: MonetaryAmount,
    purpose: Option<String>,
    remittance: Option<Remittance>,
    message: Option<String>,
}

impl GirocodeBuilder {
    pub fn version(mut self, version: GirocodeVersion) -> Self {
        self.version = version;
        self
    }

    pub fn charset(mut self, charset: GirocodeCharset) -> Self {
        self.charset = charset;
        self
    }

    /// AT-44 purpose code, at most 4 characters.
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn remittance(mut self, remittance: Remittance) -> Self {
        self.remittance = Some(remittance);
        self
    }

    /// Beneficiary-to-originator message, at most 70 characters.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn build(self) -> Result<Girocode, PayloadError> {
        let iban = checksum::normalize_iban(&self.iban);
        if !checksum::is_valid_iban(&iban) {
            return Err(PayloadError::Checksum(format!(
                "IBAN '{iban}' failed the mod-97 check"
            )));
        }
        let bic = self.bic.replace(' ', "").to_uppercase();
        if !checksum::is_valid_bic(&bic) {
            return Err(PayloadError::Checksum(format!(
                "BIC '{bic}' is not structurally valid"
            )));
        }
        rules::check_not_empty("name", &self.name)?;
        rules::check_len("name", &self.name, 70)?;
        if self.amount.currency() != "EUR" {
            return Err(PayloadError::CrossField(format!(
                "Girocode transfers are denominated in EUR, not {}",
                self.amount.currency()
            )));
        }
        if let Some(purpose) = &self.purpose {
            rules::check_len("purpose", purpose, 4)?;
        }
        match &self.remittance {
            Some(Remittance::Structured(text)) => {
                rules::check_len("structured remittance", text, 35)?;
            }
            Some(Remittance::Unstructured(text)) => {
                rules::check_len("unstructured remittance", text, 140)?;
            }
            None => {}
        }
        if let Some(message) = &self.message {
            rules::check_len("message", message, 70)?;
        }
        Ok(Girocode {
            version: self.version,
            charset: self.charset,
            bic,
            name: self.name,
            iban,
            amount: self.amount,
            purpose: self.purpose,
            remittance: self.remittance,
            message: self.message,
        })
    }
}

impl Payload for Girocode {
    fn encode(&self) -> Result<String, PayloadError> {
        let structured = match &self.remittance {
            Some(Remittance::Structured(text)) => text.as_str(),
            _ => "",
        };
        let unstructured = match &self.remittance {
            Some(Remittance::Unstructured(text)) => text.as_str(),
            _ => "",
        };
        let charset = self.charset.code().to_string();
        let amount = format!("EUR{}", self.amount.to_point_string());
        let lines = [
            "BCD",
            self.version.as_str(),
            &charset,
            "SCT",
            &self.bic,
            &self.name,
            &self.iban,
            &amount,
            self.purpose.as_deref().unwrap_or(""),
            structured,
            unstructured,
            self.message.as_deref().unwrap_or(""),
        ];
        Ok(lines.join("\n"))
    }

    fn render_hints(&self) -> RenderHints {
        // the EPC standard pins error correction to level M
        RenderHints {
            version: None,
            ecc: EccLevel::Medium,
            eci: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eur(value: rust_decimal::Decimal) -> MonetaryAmount {
        MonetaryAmount::new(value, "EUR").unwrap()
    }

    #[test]
    fn minimal_payload_layout() {
        let code = Girocode::builder(
            "Wikimedia Fördergesellschaft",
            "DE33100205000001194700",
            "BFSWDE33BER",
            eur(dec!(10)),
        )
        .build()
        .unwrap();
        assert_eq!(
            code.encode().unwrap(),
            "BCD\n001\n1\nSCT\nBFSWDE33BER\nWikimedia Fördergesellschaft\nDE33100205000001194700\nEUR10.00\n\n\n\n"
        );
    }

    #[test]
    fn non_eur_amount_is_a_cross_field_error() {
        let amount = MonetaryAmount::new(dec!(10), "CHF").unwrap();
        let result =
            Girocode::builder("Name", "DE33100205000001194700", "BFSWDE33BER", amount).build();
        assert!(matches!(result, Err(PayloadError::CrossField(_))));
    }

    #[test]
    fn structured_remittance_fills_line_ten() {
        let code = Girocode::builder(
            "Name",
            "DE33100205000001194700",
            "BFSWDE33BER",
            eur(dec!(1)),
        )
        .remittance(Remittance::Structured("RF18539007547034".into()))
        .build()
        .unwrap();
        let encoded = code.encode().unwrap();
        let lines: Vec<&str> = encoded.split('\n').collect();
        assert_eq!(lines[9], "RF18539007547034");
        assert_eq!(lines[10], "");
    }

    #[test]
    fn charset_bytes_match_declaration() {
        let code = Girocode::builder(
            "Müller GmbH",
            "DE33100205000001194700",
            "BFSWDE33BER",
            eur(dec!(1)),
        )
        .charset(GirocodeCharset::Iso8859_1)
        .build()
        .unwrap();
        let bytes = code.encode_charset_bytes().unwrap();
        // ü is a single byte in ISO 8859-1
        assert!(bytes.contains(&0xFC));
    }
}
