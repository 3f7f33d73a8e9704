//! BezahlCode payment and contact payloads (`bank://` URI scheme).
//!
//! The scheme spans eight authorities: classic account/routing-number
//! ("BNC") payments and direct debits, their SEPA counterparts with
//! IBAN/BIC and mandate data, periodic variants of both payment kinds,
//! and two plain contact records. Each variant gets its own smart
//! constructor; the authority token is derived from the chosen variant
//! and options, so no record can carry fields its authority does not
//! allow.
//!
//! Serialization is a percent-encoded query string with comma decimal
//! separators and `ddMMyyyy` dates, byte-for-byte as the scheme
//! specifies.

use chrono::NaiveDate;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::core::{MonetaryAmount, Payload, PayloadError, checksum, rules};

/// Escape everything except the RFC 3986 unreserved characters.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn escape(value: &str) -> String {
    utf8_percent_encode(value, QUERY_SET).to_string()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d%m%Y").to_string()
}

/// Authority part of the `bank://` URI; names the payload variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Authority {
    SinglePayment,
    SinglePaymentSepa,
    SingleDirectDebit,
    SingleDirectDebitSepa,
    PeriodicSinglePayment,
    PeriodicSinglePaymentSepa,
    Contact,
    ContactV2,
}

impl Authority {
    /// Literal token used in the URI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SinglePayment => "singlepayment",
            Self::SinglePaymentSepa => "singlepaymentsepa",
            Self::SingleDirectDebit => "singledirectdebit",
            Self::SingleDirectDebitSepa => "singledirectdebitsepa",
            Self::PeriodicSinglePayment => "periodicsinglepayment",
            Self::PeriodicSinglePaymentSepa => "periodicsinglepaymentsepa",
            Self::Contact => "contact",
            Self::ContactV2 => "contact_v2",
        }
    }
}

/// Domestic account number plus bank routing number, 1–9 digits each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyAccount {
    account: String,
    bnc: String,
}

impl LegacyAccount {
    pub fn new(account: &str, bnc: &str) -> Result<Self, PayloadError> {
        let account: String = account.split_whitespace().collect();
        let bnc: String = bnc.split_whitespace().collect();
        rules::check_digits("account", &account, 1, 9)?;
        rules::check_digits("bnc", &bnc, 1, 9)?;
        Ok(Self { account, bnc })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn bnc(&self) -> &str {
        &self.bnc
    }
}

/// IBAN plus BIC, checksum-verified and normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IbanBic {
    iban: String,
    bic: String,
}

impl IbanBic {
    pub fn new(iban: &str, bic: &str) -> Result<Self, PayloadError> {
        let iban = checksum::normalize_iban(iban);
        if !checksum::is_valid_iban(&iban) {
            return Err(PayloadError::Checksum(format!(
                "IBAN '{iban}' failed the mod-97 check"
            )));
        }
        let bic = bic.replace(' ', "").to_uppercase();
        if !checksum::is_valid_bic(&bic) {
            return Err(PayloadError::Checksum(format!(
                "BIC '{bic}' is not structurally valid"
            )));
        }
        Ok(Self { iban, bic })
    }

    pub fn iban(&self) -> &str {
        &self.iban
    }

    pub fn bic(&self) -> &str {
        &self.bic
    }
}

/// Account addressing of a contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AccountIdentifier {
    Legacy(LegacyAccount),
    IbanBic(IbanBic),
}

/// SEPA direct-debit mandate data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mandate {
    creditor_id: String,
    mandate_id: String,
    date_of_signature: Option<NaiveDate>,
}

impl Mandate {
    pub fn new(
        creditor_id: &str,
        mandate_id: &str,
        date_of_signature: Option<NaiveDate>,
    ) -> Result<Self, PayloadError> {
        let creditor_id = creditor_id.trim().to_uppercase();
        if !checksum::is_valid_creditor_id(&creditor_id) {
            return Err(PayloadError::Checksum(format!(
                "creditor ID '{creditor_id}' does not match the SEPA identifier pattern"
            )));
        }
        let mandate_id = mandate_id.trim().to_string();
        if !checksum::is_valid_mandate_id(&mandate_id) {
            return Err(PayloadError::Validation(format!(
                "mandate ID '{mandate_id}' must be 1 to 35 SEPA identifier characters"
            )));
        }
        Ok(Self {
            creditor_id,
            mandate_id,
            date_of_signature,
        })
    }
}

/// Recurrence unit of a periodic payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeUnit {
    Monthly,
    Weekly,
}

impl TimeUnit {
    fn code(&self) -> &'static str {
        match self {
            Self::Monthly => "M",
            Self::Weekly => "W",
        }
    }
}

/// Recurrence description for the periodic payment authorities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodicSchedule {
    time_unit: TimeUnit,
    rotation: u32,
    first_execution: Option<NaiveDate>,
    last_execution: Option<NaiveDate>,
}

impl PeriodicSchedule {
    pub fn new(
        time_unit: TimeUnit,
        rotation: u32,
        first_execution: Option<NaiveDate>,
        last_execution: Option<NaiveDate>,
    ) -> Result<Self, PayloadError> {
        if rotation == 0 {
            return Err(PayloadError::Validation(
                "periodic time unit rotation must be 1 or larger".into(),
            ));
        }
        Ok(Self {
            time_unit,
            rotation,
            first_execution,
            last_execution,
        })
    }

    fn push_query(&self, query: &mut Vec<(&'static str, String)>) {
        query.push(("periodictimeunit", self.time_unit.code().to_string()));
        query.push(("periodictimeunitrotation", self.rotation.to_string()));
        if let Some(first) = self.first_execution {
            query.push(("periodicfirstexecutiondate", format_date(first)));
        }
        if let Some(last) = self.last_execution {
            query.push(("periodiclastexecutiondate", format_date(last)));
        }
    }
}

fn render(authority: Authority, query: &[(&'static str, String)]) -> String {
    let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("bank://{}?{}", authority.as_str(), pairs.join("&"))
}

/// Classic (non-SEPA) bank transfer or direct debit.
///
/// Authorities `singlepayment`, `periodicsinglepayment`, and
/// `singledirectdebit`; addressed by account and routing number, with
/// an optional posting key.
#[derive(Debug, Clone, Serialize)]
pub struct BankTransfer {
    authority: Authority,
    name: String,
    account: LegacyAccount,
    amount: MonetaryAmount,
    posting_key: Option<u8>,
    reason: Option<String>,
    execution_date: NaiveDate,
    periodic: Option<PeriodicSchedule>,
}

impl BankTransfer {
    /// Start a `singlepayment` transfer.
    pub fn payment(
        name: &str,
        account: LegacyAccount,
        amount: MonetaryAmount,
    ) -> BankTransferBuilder {
        BankTransferBuilder::new(false, name, account, amount)
    }

    /// Start a `singledirectdebit` collection.
    pub fn direct_debit(
        name: &str,
        account: LegacyAccount,
        amount: MonetaryAmount,
    ) -> BankTransferBuilder {
        BankTransferBuilder::new(true, name, account, amount)
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }
}

pub struct BankTransferBuilder {
    direct_debit: bool,
    name: String,
    account: LegacyAccount,
    amount: MonetaryAmount,
    posting_key: Option<u8>,
    reason: Option<String>,
    execution_date: Option<NaiveDate>,
    periodic: Option<PeriodicSchedule>,
}

impl BankTransferBuilder {
    fn new(direct_debit: bool, name: &str, account: LegacyAccount, amount: MonetaryAmount) -> Self {
        Self {
            direct_debit,
            name: name.trim().to_string(),
            account,
            amount,
            posting_key: None,
            reason: None,
            execution_date: None,
            periodic: None,
        }
    }

    /// Posting key (Textschlüssel), 0–99.
    pub fn posting_key(mut self, key: u8) -> Self {
        self.posting_key = Some(key);
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Defaults to today when not set.
    pub fn execution_date(mut self, date: NaiveDate) -> Self {
        self.execution_date = Some(date);
        self
    }

    /// Turns the record into the `periodicsinglepayment` authority.
    pub fn periodic(mut self, schedule: PeriodicSchedule) -> Self {
        self.periodic = Some(schedule);
        self
    }

    pub fn build(self) -> Result<BankTransfer, PayloadError> {
        rules::check_not_empty("name", &self.name)?;
        rules::check_len("name", &self.name, 70)?;
        if let Some(reason) = &self.reason {
            rules::check_len("reason", reason, 27)?;
        }
        if self.posting_key.is_some_and(|key| key > 99) {
            return Err(PayloadError::Validation(
                "posting key must be between 0 and 99".into(),
            ));
        }
        if self.direct_debit && self.periodic.is_some() {
            return Err(PayloadError::CrossField(
                "periodic schedules apply to payments only, not to direct debits".into(),
            ));
        }
        let execution_date = match self.execution_date {
            Some(date) => {
                rules::check_not_past("executiondate", date)?;
                date
            }
            None => rules::today(),
        };
        let authority = if self.direct_debit {
            Authority::SingleDirectDebit
        } else if self.periodic.is_some() {
            Authority::PeriodicSinglePayment
        } else {
            Authority::SinglePayment
        };
        Ok(BankTransfer {
            authority,
            name: self.name,
            account: self.account,
            amount: self.amount,
            posting_key: self.posting_key,
            reason: self.reason,
            execution_date,
            periodic: self.periodic,
        })
    }
}

impl Payload for BankTransfer {
    fn encode(&self) -> Result<String, PayloadError> {
        let mut query: Vec<(&'static str, String)> = Vec::new();
        query.push(("name", escape(&self.name)));
        query.push(("account", self.account.account().to_string()));
        query.push(("bnc", self.account.bnc().to_string()));
        if let Some(key) = self.posting_key {
            query.push(("postingkey", key.to_string()));
        }
        query.push(("amount", self.amount.to_comma_string()));
        if let Some(reason) = &self.reason {
            query.push(("reason", escape(reason)));
        }
        query.push(("currency", self.amount.currency().to_string()));
        query.push(("executiondate", format_date(self.execution_date)));
        if let Some(periodic) = &self.periodic {
            periodic.push_query(&mut query);
        }
        Ok(render(self.authority, &query))
    }
}

/// SEPA bank transfer or direct debit.
///
/// Authorities `singlepaymentsepa`, `periodicsinglepaymentsepa`, and
/// `singledirectdebitsepa`; addressed by IBAN and BIC. Direct debits
/// carry creditor-ID/mandate-ID data, which no other variant may.
#[derive(Debug, Clone, Serialize)]
pub struct SepaBankTransfer {
    authority: Authority,
    name: String,
    account: IbanBic,
    amount: MonetaryAmount,
    sepa_reference: Option<String>,
    mandate: Option<Mandate>,
    reason: Option<String>,
    execution_date: NaiveDate,
    periodic: Option<PeriodicSchedule>,
}

impl SepaBankTransfer {
    /// Start a `singlepaymentsepa` transfer.
    pub fn payment(
        name: &str,
        account: IbanBic,
        amount: MonetaryAmount,
    ) -> SepaBankTransferBuilder {
        SepaBankTransferBuilder::new(None, name, account, amount)
    }

    /// Start a `singledirectdebitsepa` collection with mandate data.
    pub fn direct_debit(
        name: &str,
        account: IbanBic,
        amount: MonetaryAmount,
        mandate: Mandate,
    ) -> SepaBankTransferBuilder {
        SepaBankTransferBuilder::new(Some(mandate), name, account, amount)
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }
}

pub struct SepaBankTransferBuilder {
    mandate: Option<Mandate>,
    name: String,
    account: IbanBic,
    amount: MonetaryAmount,
    sepa_reference: Option<String>,
    reason: Option<String>,
    execution_date: Option<NaiveDate>,
    periodic: Option<PeriodicSchedule>,
}

impl SepaBankTransferBuilder {
    fn new(mandate: Option<Mandate>, name: &str, account: IbanBic, amount: MonetaryAmount) -> Self {
        Self {
            mandate,
            name: name.trim().to_string(),
            account,
            amount,
            sepa_reference: None,
            reason: None,
            execution_date: None,
            periodic: None,
        }
    }

    /// SEPA end-to-end reference, up to 35 characters.
    pub fn sepa_reference(mut self, reference: impl Into<String>) -> Self {
        self.sepa_reference = Some(reference.into());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Defaults to today when not set.
    pub fn execution_date(mut self, date: NaiveDate) -> Self {
        self.execution_date = Some(date);
        self
    }

    /// Turns the record into the `periodicsinglepaymentsepa` authority.
    pub fn periodic(mut self, schedule: PeriodicSchedule) -> Self {
        self.periodic = Some(schedule);
        self
    }

    pub fn build(self) -> Result<SepaBankTransfer, PayloadError> {
        rules::check_not_empty("name", &self.name)?;
        rules::check_len("name", &self.name, 70)?;
        if let Some(reference) = &self.sepa_reference {
            rules::check_len("separeference", reference, 35)?;
        }
        if let Some(reason) = &self.reason {
            rules::check_len("reason", reason, 140)?;
        }
        if self.mandate.is_some() && self.periodic.is_some() {
            return Err(PayloadError::CrossField(
                "periodic schedules apply to payments only, not to direct debits".into(),
            ));
        }
        let execution_date = match self.execution_date {
            Some(date) => {
                rules::check_not_past("executiondate", date)?;
                date
            }
            None => rules::today(),
        };
        let authority = if self.mandate.is_some() {
            Authority::SingleDirectDebitSepa
        } else if self.periodic.is_some() {
            Authority::PeriodicSinglePaymentSepa
        } else {
            Authority::SinglePaymentSepa
        };
        Ok(SepaBankTransfer {
            authority,
            name: self.name,
            account: self.account,
            amount: self.amount,
            sepa_reference: self.sepa_reference,
            mandate: self.mandate,
            reason: self.reason,
            execution_date,
            periodic: self.periodic,
        })
    }
}

impl Payload for SepaBankTransfer {
    fn encode(&self) -> Result<String, PayloadError> {
        let mut query: Vec<(&'static str, String)> = Vec::new();
        query.push(("name", escape(&self.name)));
        query.push(("iban", self.account.iban().to_string()));
        query.push(("bic", self.account.bic().to_string()));
        if let Some(reference) = &self.sepa_reference {
            query.push(("separeference", escape(reference)));
        }
        if let Some(mandate) = &self.mandate {
            query.push(("creditorid", escape(&mandate.creditor_id)));
            query.push(("mandateid", escape(&mandate.mandate_id)));
            if let Some(signed) = mandate.date_of_signature {
                query.push(("dateofsignature", format_date(signed)));
            }
        }
        query.push(("amount", self.amount.to_comma_string()));
        if let Some(reason) = &self.reason {
            query.push(("reason", escape(reason)));
        }
        query.push(("currency", self.amount.currency().to_string()));
        query.push(("executiondate", format_date(self.execution_date)));
        if let Some(periodic) = &self.periodic {
            periodic.push_query(&mut query);
        }
        Ok(render(self.authority, &query))
    }
}

/// Plain contact record, no payment data.
///
/// `contact` carries account and routing number; `contact_v2` accepts
/// either addressing.
#[derive(Debug, Clone, Serialize)]
pub struct ContactData {
    authority: Authority,
    name: String,
    account: AccountIdentifier,
    reason: Option<String>,
}

impl ContactData {
    /// Classic `contact` record.
    pub fn new(
        name: &str,
        account: LegacyAccount,
        reason: Option<&str>,
    ) -> Result<Self, PayloadError> {
        Self::build(
            Authority::Contact,
            name,
            AccountIdentifier::Legacy(account),
            reason,
        )
    }

    /// `contact_v2` record with either account addressing.
    pub fn new_v2(
        name: &str,
        account: AccountIdentifier,
        reason: Option<&str>,
    ) -> Result<Self, PayloadError> {
        Self::build(Authority::ContactV2, name, account, reason)
    }

    fn build(
        authority: Authority,
        name: &str,
        account: AccountIdentifier,
        reason: Option<&str>,
    ) -> Result<Self, PayloadError> {
        let name = name.trim().to_string();
        rules::check_not_empty("name", &name)?;
        rules::check_len("name", &name, 70)?;
        let reason = reason.map(str::to_string);
        if let Some(reason) = &reason {
            rules::check_len("reason", reason, 27)?;
        }
        Ok(Self {
            authority,
            name,
            account,
            reason,
        })
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }
}

impl Payload for ContactData {
    fn encode(&self) -> Result<String, PayloadError> {
        let mut query: Vec<(&'static str, String)> = Vec::new();
        query.push(("name", escape(&self.name)));
        match &self.account {
            AccountIdentifier::Legacy(account) => {
                query.push(("account", account.account().to_string()));
                query.push(("bnc", account.bnc().to_string()));
            }
            AccountIdentifier::IbanBic(account) => {
                query.push(("iban", account.iban().to_string()));
                query.push(("bic", account.bic().to_string()));
            }
        }
        if let Some(reason) = &self.reason {
            query.push(("reason", escape(reason)));
        }
        Ok(render(self.authority, &query))
    }
}
