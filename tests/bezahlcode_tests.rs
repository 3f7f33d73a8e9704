#![cfg(feature = "bezahlcode")]

use chrono::NaiveDate;
use payqr::bezahlcode::*;
use payqr::core::{MonetaryAmount, Payload, PayloadError};
use rust_decimal_macros::dec;

fn eur(value: rust_decimal::Decimal) -> MonetaryAmount {
    MonetaryAmount::new(value, "EUR").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn wikimedia_account() -> IbanBic {
    IbanBic::new("DE33100205000001194700", "BFSWDE33BER").unwrap()
}

// --- SEPA payments ---

#[test]
fn sepa_minimal_transfer_end_to_end() {
    let transfer = SepaBankTransfer::payment(
        "Wikimedia Fördergesellschaft",
        wikimedia_account(),
        eur(dec!(10.00)),
    )
    .build()
    .unwrap();

    let today = chrono::Local::now().date_naive().format("%d%m%Y");
    assert_eq!(
        transfer.encode().unwrap(),
        format!(
            "bank://singlepaymentsepa?name=Wikimedia%20F%C3%B6rdergesellschaft\
             &iban=DE33100205000001194700&bic=BFSWDE33BER&amount=10,00\
             &currency=EUR&executiondate={today}"
        )
    );
}

#[test]
fn sepa_transfer_with_reference_and_reason() {
    let transfer = SepaBankTransfer::payment("Verein e.V.", wikimedia_account(), eur(dec!(25.5)))
        .sepa_reference("RE-2026/0815")
        .reason("Mitgliedsbeitrag 2026")
        .execution_date(date(2030, 1, 15))
        .build()
        .unwrap();

    assert_eq!(
        transfer.encode().unwrap(),
        "bank://singlepaymentsepa?name=Verein%20e.V.&iban=DE33100205000001194700\
         &bic=BFSWDE33BER&separeference=RE-2026%2F0815&amount=25,50\
         &reason=Mitgliedsbeitrag%202026&currency=EUR&executiondate=15012030"
    );
}

#[test]
fn sepa_direct_debit_carries_mandate_block() {
    let mandate = Mandate::new("DE98ZZZ09999999999", "MANDATE-001", Some(date(2026, 1, 2))).unwrap();
    let debit = SepaBankTransfer::direct_debit(
        "Stadtwerke",
        wikimedia_account(),
        eur(dec!(89.90)),
        mandate,
    )
    .execution_date(date(2030, 6, 1))
    .build()
    .unwrap();

    assert_eq!(debit.authority(), Authority::SingleDirectDebitSepa);
    let payload = debit.encode().unwrap();
    assert!(payload.starts_with("bank://singledirectdebitsepa?name=Stadtwerke&"));
    assert!(payload.contains("&creditorid=DE98ZZZ09999999999&mandateid=MANDATE-001&dateofsignature=02012026&amount=89,90&"));
}

#[test]
fn sepa_periodic_payment_appends_schedule() {
    let schedule =
        PeriodicSchedule::new(TimeUnit::Monthly, 1, Some(date(2030, 2, 1)), None).unwrap();
    let transfer = SepaBankTransfer::payment("Vermieter", wikimedia_account(), eur(dec!(950)))
        .execution_date(date(2030, 1, 1))
        .periodic(schedule)
        .build()
        .unwrap();

    assert_eq!(transfer.authority(), Authority::PeriodicSinglePaymentSepa);
    assert!(transfer.encode().unwrap().ends_with(
        "&currency=EUR&executiondate=01012030&periodictimeunit=M\
         &periodictimeunitrotation=1&periodicfirstexecutiondate=01022030"
    ));
}

#[test]
fn invalid_iban_is_a_checksum_error() {
    let result = IbanBic::new("DE33100205000001194701", "BFSWDE33BER");
    assert!(matches!(result, Err(PayloadError::Checksum(_))));
}

#[test]
fn past_execution_date_is_rejected() {
    let result = SepaBankTransfer::payment("Name", wikimedia_account(), eur(dec!(10)))
        .execution_date(date(2020, 1, 1))
        .build();
    assert!(result.is_err());
}

#[test]
fn sepa_reference_length_cap() {
    let result = SepaBankTransfer::payment("Name", wikimedia_account(), eur(dec!(10)))
        .sepa_reference("x".repeat(36))
        .build();
    assert!(result.is_err());
}

// --- non-SEPA payments ---

#[test]
fn non_sepa_transfer_with_posting_key() {
    let account = LegacyAccount::new("100000001", "10020500").unwrap();
    let transfer = BankTransfer::payment("Empfänger", account, eur(dec!(10)))
        .posting_key(69)
        .reason("Spende")
        .execution_date(date(2030, 3, 3))
        .build()
        .unwrap();

    assert_eq!(
        transfer.encode().unwrap(),
        "bank://singlepayment?name=Empf%C3%A4nger&account=100000001&bnc=10020500\
         &postingkey=69&amount=10,00&reason=Spende&currency=EUR&executiondate=03032030"
    );
}

#[test]
fn non_sepa_reason_is_capped_at_27() {
    let account = LegacyAccount::new("100000001", "10020500").unwrap();
    let result = BankTransfer::payment("Name", account.clone(), eur(dec!(10)))
        .reason("x".repeat(28))
        .build();
    assert!(result.is_err());

    let result = BankTransfer::payment("Name", account, eur(dec!(10)))
        .reason("x".repeat(27))
        .build();
    assert!(result.is_ok());
}

#[test]
fn non_sepa_direct_debit_authority() {
    let account = LegacyAccount::new("100000001", "10020500").unwrap();
    let debit = BankTransfer::direct_debit("Verein", account, eur(dec!(12)))
        .build()
        .unwrap();
    assert_eq!(debit.authority(), Authority::SingleDirectDebit);
    assert!(
        debit
            .encode()
            .unwrap()
            .starts_with("bank://singledirectdebit?name=Verein&account=100000001&bnc=10020500&")
    );
}

#[test]
fn currency_other_than_eur_is_carried() {
    let account = LegacyAccount::new("100000001", "10020500").unwrap();
    let amount = MonetaryAmount::new(dec!(10), "USD").unwrap();
    let transfer = BankTransfer::payment("Name", account, amount)
        .execution_date(date(2030, 1, 1))
        .build()
        .unwrap();
    assert!(transfer.encode().unwrap().contains("&currency=USD&"));
}

// --- contact records ---

#[test]
fn contact_v2_accepts_iban_addressing() {
    let contact = ContactData::new_v2(
        "Max Mustermann",
        AccountIdentifier::IbanBic(wikimedia_account()),
        Some("Kontakt"),
    )
    .unwrap();
    assert_eq!(
        contact.encode().unwrap(),
        "bank://contact_v2?name=Max%20Mustermann&iban=DE33100205000001194700\
         &bic=BFSWDE33BER&reason=Kontakt"
    );
}

#[test]
fn encoding_is_deterministic() {
    let transfer = SepaBankTransfer::payment("Name", wikimedia_account(), eur(dec!(10)))
        .execution_date(date(2030, 1, 1))
        .build()
        .unwrap();
    assert_eq!(transfer.encode().unwrap(), transfer.encode().unwrap());
}
