//! Swiss QR-bill payloads.
//!
//! The QR-bill is a fixed-order record joined with `\r\n`: a three-line
//! header (`SPC`, version `0200`, coding type `1`), the creditor IBAN,
//! a seven-line creditor block, seven lines reserved for the ultimate
//! creditor (delivered empty), amount and currency, a seven-line debtor
//! block or seven blanks, the payment reference, additional
//! information closed by the `EPD` trailer, and up to two
//! alternative-procedure lines. Trailing blank lines are stripped.
//!
//! The scheme ties the account and reference type together: a QR-IBAN
//! (institution identifier 30000–31999) demands a QR reference, a
//! classic IBAN forbids one. Error correction is pinned to level M.

mod address;
mod reference;

pub use address::Contact;
pub use reference::{AdditionalInformation, Reference, ReferenceType};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{
    EccLevel, Payload, PayloadError, RenderHints, amount, checksum, rules,
};

/// Billing currency; the scheme admits nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Currency {
    Chf,
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chf => "CHF",
            Self::Eur => "EUR",
        }
    }
}

/// A Swiss account number: 21 characters, `CH` or `LI`, mod-97 valid,
/// with the QR-IBAN institution range detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwissIban {
    iban: String,
    qr_iban: bool,
}

impl SwissIban {
    pub fn new(iban: &str) -> Result<Self, PayloadError> {
        let iban = checksum::normalize_iban(iban);
        if !iban.starts_with("CH") && !iban.starts_with("LI") {
            return Err(PayloadError::Validation(
                "the IBAN must start with \"CH\" or \"LI\"".into(),
            ));
        }
        if iban.chars().count() != 21 {
            return Err(PayloadError::Validation(
                "Swiss and Liechtenstein IBANs are exactly 21 characters".into(),
            ));
        }
        if !checksum::is_valid_iban(&iban) {
            return Err(PayloadError::Checksum(format!(
                "IBAN '{iban}' failed the mod-97 check"
            )));
        }
        let qr_iban = checksum::is_qr_iban(&iban);
        Ok(Self { iban, qr_iban })
    }

    pub fn as_str(&self) -> &str {
        &self.iban
    }

    /// Whether the institution identifier lies in the reserved QR-IBAN
    /// range.
    pub fn is_qr_iban(&self) -> bool {
        self.qr_iban
    }
}

/// A validated QR-bill record.
#[derive(Debug, Clone, Serialize)]
pub struct SwissQrBill {
    iban: SwissIban,
    creditor: Contact,
    amount: Option<Decimal>,
    currency: Currency,
    debtor: Option<Contact>,
    reference: Reference,
    additional: AdditionalInformation,
    alternative_procedures: Vec<String>,
}

impl SwissQrBill {
    pub fn builder(iban: SwissIban, creditor: Contact, currency: Currency) -> SwissQrBillBuilder {
        SwissQrBillBuilder {
            iban,
            creditor,
            currency,
            amount: None,
            debtor: None,
            reference: Reference::none(),
            additional: AdditionalInformation::default(),
            alternative_procedures: Vec::new(),
        }
    }
}

pub struct SwissQrBillBuilder {
    iban: SwissIban,
    creditor: Contact,
    currency: Currency,
    amount: Option<Decimal>,
    debtor: Option<Contact>,
    reference: Reference,
    additional: AdditionalInformation,
    alternative_procedures: Vec<String>,
}

impl SwissQrBillBuilder {
    /// The billed amount; a bill without one asks the payer to choose.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn debtor(mut self, debtor: Contact) -> Self {
        self.debtor = Some(debtor);
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = reference;
        self
    }

    pub fn additional_information(mut self, additional: AdditionalInformation) -> Self {
        self.additional = additional;
        self
    }

    /// Alternative procedure line (e.g. eBill); at most two, 100
    /// characters each.
    pub fn alternative_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.alternative_procedures.push(procedure.into());
        self
    }

    pub fn build(self) -> Result<SwissQrBill, PayloadError> {
        if let Some(value) = self.amount {
            amount::check_amount(value)?;
        }
        if self.iban.is_qr_iban() && self.reference.ref_type() != ReferenceType::Qrr {
            return Err(PayloadError::CrossField(
                "if a QR-IBAN is used, you have to choose \"QRR\" as reference type".into(),
            ));
        }
        if !self.iban.is_qr_iban() && self.reference.ref_type() == ReferenceType::Qrr {
            return Err(PayloadError::CrossField(
                "if a non QR-IBAN is used, you have to choose either \"SCOR\" or \"NON\" as reference type"
                    .into(),
            ));
        }
        if self.alternative_procedures.len() > 2 {
            return Err(PayloadError::Validation(
                "at most two alternative procedures are allowed".into(),
            ));
        }
        for procedure in &self.alternative_procedures {
            rules::check_not_empty("alternative procedure", procedure)?;
            rules::check_len("alternative procedure", procedure, 100)?;
        }
        Ok(SwissQrBill {
            iban: self.iban,
            creditor: self.creditor,
            amount: self.amount,
            currency: self.currency,
            debtor: self.debtor,
            reference: self.reference,
            additional: self.additional,
            alternative_procedures: self.alternative_procedures,
        })
    }
}

impl Payload for SwissQrBill {
    fn encode(&self) -> Result<String, PayloadError> {
        let mut lines: Vec<String> = Vec::with_capacity(34);
        // header
        lines.push("SPC".into());
        lines.push("0200".into());
        lines.push("1".into());
        // creditor information
        lines.push(self.iban.as_str().into());
        lines.extend(self.creditor.to_lines());
        // ultimate creditor, reserved for future use
        lines.extend(std::iter::repeat_n(String::new(), 7));
        // amount block
        lines.push(self.amount.map(amount::format_point).unwrap_or_default());
        lines.push(self.currency.as_str().into());
        // ultimate debtor
        match &self.debtor {
            Some(debtor) => lines.extend(debtor.to_lines()),
            None => lines.extend(std::iter::repeat_n(String::new(), 7)),
        }
        // remittance information
        lines.push(self.reference.ref_type().as_str().into());
        lines.push(self.reference.text().unwrap_or_default().into());
        lines.push(self.additional.unstructured().unwrap_or_default().into());
        lines.push("EPD".into());
        lines.push(self.additional.bill_information().unwrap_or_default().into());
        // alternative procedures
        lines.extend(self.alternative_procedures.iter().cloned());

        let payload = lines.join("\r\n");
        Ok(payload.trim_end_matches(['\r', '\n']).to_string())
    }

    fn render_hints(&self) -> RenderHints {
        // the Swiss implementation guidelines pin error correction to M
        RenderHints {
            version: None,
            ecc: EccLevel::Medium,
            eci: None,
        }
    }
}
