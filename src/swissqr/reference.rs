//! Payment reference and additional-information blocks of the QR-bill.

use serde::Serialize;

use crate::core::{PayloadError, checksum, rules};

/// Reference type declared in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceType {
    /// QR reference (27 digits, Mod-10 protected). Requires a QR-IBAN.
    Qrr,
    /// ISO 11649 creditor reference.
    Scor,
    /// No reference.
    Non,
}

impl ReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qrr => "QRR",
            Self::Scor => "SCOR",
            Self::Non => "NON",
        }
    }
}

/// A validated payment reference.
///
/// Reference text is forbidden for `NON` and carries its checksum/length
/// rules with the constructor, so no record can hold a reference text
/// without its matching text type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    ref_type: ReferenceType,
    text: Option<String>,
}

impl Reference {
    /// Reference-free payment (`NON`).
    pub fn none() -> Self {
        Self {
            ref_type: ReferenceType::Non,
            text: None,
        }
    }

    /// QR reference (`QRR`): digits only, at most 27 characters,
    /// Mod-10 verified.
    pub fn qr(text: &str) -> Result<Self, PayloadError> {
        let text = text.replace(' ', "");
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PayloadError::Validation(
                "QR references consist of digits only".into(),
            ));
        }
        rules::check_len("QR reference", &text, 27)?;
        if !checksum::is_valid_qr_reference(&text) {
            return Err(PayloadError::Checksum(format!(
                "QR reference '{text}' failed the Mod-10 check"
            )));
        }
        Ok(Self {
            ref_type: ReferenceType::Qrr,
            text: Some(text),
        })
    }

    /// ISO 11649 creditor reference (`SCOR`), at most 25 characters.
    pub fn creditor_reference(text: &str) -> Result<Self, PayloadError> {
        let text = text.replace(' ', "").to_uppercase();
        rules::check_not_empty("creditor reference", &text)?;
        rules::check_len("creditor reference", &text, 25)?;
        if !text.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(PayloadError::Validation(
                "creditor references consist of letters and digits only".into(),
            ));
        }
        Ok(Self {
            ref_type: ReferenceType::Scor,
            text: Some(text),
        })
    }

    pub fn ref_type(&self) -> ReferenceType {
        self.ref_type
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Unstructured message and billing information, at most 140 characters
/// combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdditionalInformation {
    unstructured: Option<String>,
    bill_information: Option<String>,
}

impl AdditionalInformation {
    pub fn new(
        unstructured: Option<&str>,
        bill_information: Option<&str>,
    ) -> Result<Self, PayloadError> {
        let unstructured = unstructured.map(|m| m.trim().replace(['\n', '\r'], ""));
        let bill_information = bill_information.map(|b| b.trim().replace(['\n', '\r'], ""));
        let combined = unstructured.as_deref().unwrap_or("").chars().count()
            + bill_information.as_deref().unwrap_or("").chars().count();
        if combined > 140 {
            return Err(PayloadError::Validation(
                "unstructured message and billing information must not exceed 140 characters combined"
                    .into(),
            ));
        }
        Ok(Self {
            unstructured,
            bill_information,
        })
    }

    pub fn unstructured(&self) -> Option<&str> {
        self.unstructured.as_deref()
    }

    pub fn bill_information(&self) -> Option<&str> {
        self.bill_information.as_deref()
    }
}
