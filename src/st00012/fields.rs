//! Optional payment-order attributes.
//!
//! The standard defines a tax block with hard length caps plus an open
//! set of free-form attributes for utility, school, and government
//! payments. Serialization walks an explicit, declaration-ordered list
//! of `(key, value)` pairs — the key casing below is the wire format.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::PayloadError;

fn date_field(date: &NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Optional key=value attributes of a payment order.
///
/// All fields default to absent; populated fields are validated when
/// the order record is constructed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OptionalFields {
    /// Amount in kopeks, up to 18 digits.
    pub sum: Option<String>,
    /// Payment purpose, up to 160 characters.
    pub purpose: Option<String>,
    /// Payee taxpayer number (INN), up to 12 digits.
    pub payee_inn: Option<String>,
    /// Payer taxpayer number (INN), up to 12 digits.
    pub payer_inn: Option<String>,
    /// Drawer status code, up to 2 characters.
    pub drawer_status: Option<String>,
    /// Payee registration reason code (KPP), up to 9 characters.
    pub kpp: Option<String>,
    /// Budget classification code (KBK), up to 20 characters.
    pub cbc: Option<String>,
    /// Municipal territory code, up to 11 characters.
    pub oktmo: Option<String>,
    /// Tax payment reason code, up to 2 characters.
    pub payt_reason: Option<String>,
    /// Tax period, up to 10 characters.
    pub tax_period: Option<String>,
    /// Tax document number, up to 15 characters.
    pub doc_no: Option<String>,
    /// Tax document date.
    pub doc_date: Option<NaiveDate>,
    /// Tax payment kind, up to 2 characters.
    pub tax_payt_kind: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub payer_address: Option<String>,
    /// Personal account at the payee organization.
    pub personal_account: Option<String>,
    /// Payment document index.
    pub doc_idx: Option<String>,
    /// Personal account number in the pension fund (SNILS).
    pub pens_acc: Option<String>,
    pub contract: Option<String>,
    /// Payer's account ledger number at the payee.
    pub pers_acc: Option<String>,
    pub flat: Option<String>,
    pub phone: Option<String>,
    pub payer_id_type: Option<String>,
    pub payer_id_num: Option<String>,
    /// Full name of the child (school and kindergarten payments).
    pub child_fio: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub paym_term: Option<String>,
    pub paym_period: Option<String>,
    pub category: Option<String>,
    pub service_name: Option<String>,
    pub counter_id: Option<String>,
    pub counter_val: Option<String>,
    pub quitt_id: Option<String>,
    pub quitt_date: Option<NaiveDate>,
    pub inst_num: Option<String>,
    pub class_num: Option<String>,
    /// Full name of the teacher or specialist.
    pub spec_fio: Option<String>,
    pub add_amount: Option<String>,
    pub rule_id: Option<String>,
    pub exec_id: Option<String>,
    pub reg_type: Option<String>,
    /// Unique accrual identifier.
    pub uin: Option<String>,
    /// Technical code of the payment kind.
    pub tech_code: Option<String>,
}

impl OptionalFields {
    /// Validate the attributes the standard caps.
    pub(crate) fn validate(&self) -> Result<(), PayloadError> {
        check_digits("Sum", &self.sum, 18)?;
        check_len("Purpose", &self.purpose, 160)?;
        check_digits("PayeeINN", &self.payee_inn, 12)?;
        check_digits("PayerINN", &self.payer_inn, 12)?;
        check_len("DrawerStatus", &self.drawer_status, 2)?;
        check_len("KPP", &self.kpp, 9)?;
        check_len("CBC", &self.cbc, 20)?;
        check_len("OKTMO", &self.oktmo, 11)?;
        check_len("PaytReason", &self.payt_reason, 2)?;
        check_len("TaxPeriod", &self.tax_period, 10)?;
        check_len("DocNo", &self.doc_no, 15)?;
        check_len("TaxPaytKind", &self.tax_payt_kind, 2)?;
        Ok(())
    }

    /// Populated attributes in declaration order, ready to serialize.
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key, value));
            }
        };
        push("Sum", self.sum.clone());
        push("Purpose", self.purpose.clone());
        push("PayeeINN", self.payee_inn.clone());
        push("PayerINN", self.payer_inn.clone());
        push("DrawerStatus", self.drawer_status.clone());
        push("KPP", self.kpp.clone());
        push("CBC", self.cbc.clone());
        push("OKTMO", self.oktmo.clone());
        push("PaytReason", self.payt_reason.clone());
        push("TaxPeriod", self.tax_period.clone());
        push("DocNo", self.doc_no.clone());
        push("DocDate", self.doc_date.as_ref().map(date_field));
        push("TaxPaytKind", self.tax_payt_kind.clone());
        push("LastName", self.last_name.clone());
        push("FirstName", self.first_name.clone());
        push("MiddleName", self.middle_name.clone());
        push("PayerAddress", self.payer_address.clone());
        push("PersonalAccount", self.personal_account.clone());
        push("DocIdx", self.doc_idx.clone());
        push("PensAcc", self.pens_acc.clone());
        push("Contract", self.contract.clone());
        push("PersAcc", self.pers_acc.clone());
        push("Flat", self.flat.clone());
        push("Phone", self.phone.clone());
        push("PayerIdType", self.payer_id_type.clone());
        push("PayerIdNum", self.payer_id_num.clone());
        push("ChildFio", self.child_fio.clone());
        push("BirthDate", self.birth_date.as_ref().map(date_field));
        push("PaymTerm", self.paym_term.clone());
        push("PaymPeriod", self.paym_period.clone());
        push("Category", self.category.clone());
        push("ServiceName", self.service_name.clone());
        push("CounterId", self.counter_id.clone());
        push("CounterVal", self.counter_val.clone());
        push("QuittId", self.quitt_id.clone());
        push("QuittDate", self.quitt_date.as_ref().map(date_field));
        push("InstNum", self.inst_num.clone());
        push("ClassNum", self.class_num.clone());
        push("SpecFio", self.spec_fio.clone());
        push("AddAmount", self.add_amount.clone());
        push("RuleId", self.rule_id.clone());
        push("ExecId", self.exec_id.clone());
        push("RegType", self.reg_type.clone());
        push("UIN", self.uin.clone());
        push("TechCode", self.tech_code.clone());
        pairs
    }
}

fn check_len(key: &str, value: &Option<String>, max: usize) -> Result<(), PayloadError> {
    if let Some(value) = value {
        let len = value.chars().count();
        if len == 0 || len > max {
            return Err(PayloadError::Validation(format!(
                "{key} must be 1 to {max} characters"
            )));
        }
    }
    Ok(())
}

fn check_digits(key: &str, value: &Option<String>, max: usize) -> Result<(), PayloadError> {
    if let Some(value) = value {
        let len = value.chars().count();
        if len == 0 || len > max || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PayloadError::Validation(format!(
                "{key} must be 1 to {max} digits"
            )));
        }
    }
    Ok(())
}
