//! Slovenian UPN QR payloads.
//!
//! The universal payment order (UPN) form encodes as twenty
//! `\n`-terminated lines opening with the literal `UPNQR`. The amount
//! is serialized as eleven zero-padded digits of hundredths, and the
//! record closes with a three-digit control value — a length sentinel
//! over the field contents, not a cryptographic checksum. The form
//! standard pins the symbol: version 15, error correction M, ECI
//! ISO 8859-2.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::core::{
    EccLevel, EciMode, MonetaryAmount, Payload, PayloadError, RenderHints, rules,
};

/// Number of separators ahead of the control-value field.
const SEPARATORS_BEFORE_CONTROL: usize = 19;

/// Payer or recipient block: name, street address, and place, at most
/// 33 characters each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpnParty {
    name: String,
    address: String,
    place: String,
}

impl UpnParty {
    pub fn new(name: &str, address: &str, place: &str) -> Result<Self, PayloadError> {
        let name = name.trim().to_string();
        let address = address.trim().to_string();
        let place = place.trim().to_string();
        rules::check_len("name", &name, 33)?;
        rules::check_len("address", &address, 33)?;
        rules::check_len("place", &place, 33)?;
        Ok(Self {
            name,
            address,
            place,
        })
    }
}

/// A validated UPN QR record.
#[derive(Debug, Clone, Serialize)]
pub struct UpnQr {
    payer: UpnParty,
    recipient: UpnParty,
    recipient_iban: String,
    amount: Decimal,
    code: String,
    purpose: String,
    deadline: Option<NaiveDate>,
    model: String,
    reference: String,
}

impl UpnQr {
    /// Start a record. UPN amounts are EUR; any other currency is a
    /// cross-field error at build time.
    pub fn builder(
        payer: UpnParty,
        recipient: UpnParty,
        recipient_iban: &str,
        amount: MonetaryAmount,
    ) -> UpnQrBuilder {
        UpnQrBuilder {
            payer,
            recipient,
            recipient_iban: recipient_iban.to_string(),
            amount,
            code: "OTHR".to_string(),
            purpose: String::new(),
            deadline: None,
            model: "SI00".to_string(),
            reference: String::new(),
        }
    }

    /// Eleven zero-padded digits of hundredths, no decimal point.
    fn amount_field(&self) -> String {
        let hundredths = (self.amount * Decimal::ONE_HUNDRED)
            .round()
            .to_u64()
            .unwrap_or(0);
        format!("{hundredths:011}")
    }

    fn deadline_field(&self) -> String {
        self.deadline
            .map(|d| d.format("%d.%m.%Y").to_string())
            .unwrap_or_default()
    }

    /// Length sentinel: 5 for the `UPNQR` tag, the field contents, and
    /// the 19 separators ahead of the control field.
    fn control_value(&self) -> usize {
        let amount_field = self.amount_field();
        let deadline_field = self.deadline_field();
        let fields: [&str; 13] = [
            &self.payer.name,
            &self.payer.address,
            &self.payer.place,
            &amount_field,
            &self.code,
            &self.purpose,
            &deadline_field,
            &self.recipient_iban,
            &self.model,
            &self.reference,
            &self.recipient.name,
            &self.recipient.address,
            &self.recipient.place,
        ];
        let content: usize = fields.iter().map(|f| f.chars().count()).sum();
        5 + content + SEPARATORS_BEFORE_CONTROL
    }
}

pub struct UpnQrBuilder {
    payer: UpnParty,
    recipient: UpnParty,
    recipient_iban: String,
    amount: MonetaryAmount,
    code: String,
    purpose: String,
    deadline: Option<NaiveDate>,
    model: String,
    reference: String,
}

impl UpnQrBuilder {
    /// Four-letter payment purpose code; defaults to `OTHR`.
    pub fn code(mut self, code: &str) -> Self {
        self.code = code.trim().to_uppercase();
        self
    }

    /// Payment description, at most 42 characters.
    pub fn purpose(mut self, purpose: &str) -> Self {
        self.purpose = purpose.trim().to_string();
        self
    }

    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Reference model (e.g. `SI00`, `RF…`) and reference number.
    pub fn reference(mut self, model: &str, reference: &str) -> Self {
        self.model = model.trim().to_uppercase();
        self.reference = reference.trim().to_string();
        self
    }

    pub fn build(self) -> Result<UpnQr, PayloadError> {
        if self.amount.currency() != "EUR" {
            return Err(PayloadError::CrossField(format!(
                "UPN QR amounts are denominated in EUR, not {}",
                self.amount.currency()
            )));
        }
        let recipient_iban: String = self
            .recipient_iban
            .split_whitespace()
            .collect::<String>()
            .to_uppercase();
        rules::check_not_empty("recipient IBAN", &recipient_iban)?;
        rules::check_len("recipient IBAN", &recipient_iban, 34)?;
        if self.code.is_empty() || self.code.chars().count() > 4 {
            return Err(PayloadError::Validation(
                "payment code must be 1 to 4 characters".into(),
            ));
        }
        rules::check_len("purpose", &self.purpose, 42)?;
        rules::check_len("reference model", &self.model, 4)?;
        rules::check_len("reference", &self.reference, 22)?;
        if self.model.chars().count() + self.reference.chars().count() > 26 {
            return Err(PayloadError::Validation(
                "reference model and number must not exceed 26 characters combined".into(),
            ));
        }
        Ok(UpnQr {
            payer: self.payer,
            recipient: self.recipient,
            recipient_iban,
            amount: self.amount.value(),
            code: self.code,
            purpose: self.purpose,
            deadline: self.deadline,
            model: self.model,
            reference: self.reference,
        })
    }
}

impl Payload for UpnQr {
    fn encode(&self) -> Result<String, PayloadError> {
        let mut lines: Vec<String> = Vec::with_capacity(20);
        lines.push("UPNQR".into());
        // payer IBAN, deposit, withdrawal, payer reference — unused
        lines.extend(std::iter::repeat_n(String::new(), 4));
        lines.push(self.payer.name.clone());
        lines.push(self.payer.address.clone());
        lines.push(self.payer.place.clone());
        lines.push(self.amount_field());
        // payment date and urgency — unused
        lines.extend(std::iter::repeat_n(String::new(), 2));
        lines.push(self.code.clone());
        lines.push(self.purpose.clone());
        lines.push(self.deadline_field());
        lines.push(self.recipient_iban.clone());
        lines.push(format!("{}{}", self.model, self.reference));
        lines.push(self.recipient.name.clone());
        lines.push(self.recipient.address.clone());
        lines.push(self.recipient.place.clone());
        lines.push(format!("{:03}", self.control_value()));
        // every line is newline-terminated, including the last
        Ok(lines.join("\n") + "\n")
    }

    fn render_hints(&self) -> RenderHints {
        // pinned by the UPN form standard
        RenderHints {
            version: Some(15),
            ecc: EccLevel::Medium,
            eci: Some(EciMode::Iso8859_2),
        }
    }
}
