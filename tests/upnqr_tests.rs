#![cfg(feature = "upnqr")]

use chrono::NaiveDate;
use payqr::core::{MonetaryAmount, Payload};
use payqr::upnqr::*;
use rust_decimal_macros::dec;

fn eur(value: rust_decimal::Decimal) -> MonetaryAmount {
    MonetaryAmount::new(value, "EUR").unwrap()
}

fn janez() -> UpnParty {
    UpnParty::new("Janez Novak", "Lepa cesta 152 a", "2000 Maribor").unwrap()
}

fn podjetje() -> UpnParty {
    UpnParty::new("Podjetje d.o.o.", "Dunajska cesta 50", "1000 Ljubljana").unwrap()
}

#[test]
fn worked_example() {
    let upn = UpnQr::builder(janez(), podjetje(), "SI56011006001234567", eur(dec!(150.50)))
        .code("OTHR")
        .purpose("Payment for services")
        .build()
        .unwrap();

    let payload = upn.encode().unwrap();
    let lines: Vec<&str> = payload.split('\n').collect();

    assert_eq!(lines[0], "UPNQR");
    assert_eq!(lines[5], "Janez Novak");
    assert_eq!(lines[8], "00000015050");
    assert_eq!(lines[11], "OTHR");
    assert_eq!(lines[12], "Payment for services");
    assert_eq!(lines[14], "SI56011006001234567");
    assert_eq!(lines[15], "SI00");
    assert_eq!(lines[16], "Podjetje d.o.o.");
    assert_eq!(lines[19], "167");
}

#[test]
fn amount_field_has_no_decimal_point() {
    let upn = UpnQr::builder(janez(), podjetje(), "SI56011006001234567", eur(dec!(1)))
        .build()
        .unwrap();
    let payload = upn.encode().unwrap();
    assert_eq!(payload.split('\n').nth(8), Some("00000000100"));
}

#[test]
fn deadline_renders_dotted() {
    let upn = UpnQr::builder(janez(), podjetje(), "SI56011006001234567", eur(dec!(20)))
        .deadline(NaiveDate::from_ymd_opt(2026, 11, 15).unwrap())
        .build()
        .unwrap();
    let payload = upn.encode().unwrap();
    assert_eq!(payload.split('\n').nth(13), Some("15.11.2026"));
}

#[test]
fn control_value_tracks_field_lengths() {
    // deadline adds ten characters to the sentinel
    let without = UpnQr::builder(janez(), podjetje(), "SI56011006001234567", eur(dec!(20)))
        .build()
        .unwrap();
    let with = UpnQr::builder(janez(), podjetje(), "SI56011006001234567", eur(dec!(20)))
        .deadline(NaiveDate::from_ymd_opt(2026, 11, 15).unwrap())
        .build()
        .unwrap();

    let control = |payload: String| {
        payload
            .split('\n')
            .nth(19)
            .unwrap()
            .parse::<usize>()
            .unwrap()
    };
    let a = control(without.encode().unwrap());
    let b = control(with.encode().unwrap());
    assert_eq!(b, a + 10);
}

#[test]
fn code_is_uppercased() {
    let upn = UpnQr::builder(janez(), podjetje(), "SI56011006001234567", eur(dec!(5)))
        .code("rent")
        .build()
        .unwrap();
    assert_eq!(upn.encode().unwrap().split('\n').nth(11), Some("RENT"));
}

#[test]
fn over_length_reference_fails() {
    let result = UpnQr::builder(janez(), podjetje(), "SI56011006001234567", eur(dec!(5)))
        .reference("SI12", &"9".repeat(23))
        .build();
    assert!(result.is_err());
}

#[test]
fn iban_cap_is_34_chars() {
    let result = UpnQr::builder(janez(), podjetje(), &"S".repeat(35), eur(dec!(5))).build();
    assert!(result.is_err());
}

#[test]
fn payload_ends_with_terminated_control_line() {
    let upn = UpnQr::builder(janez(), podjetje(), "SI56011006001234567", eur(dec!(5)))
        .build()
        .unwrap();
    let payload = upn.encode().unwrap();
    assert!(payload.ends_with('\n'));
    assert_eq!(payload.matches('\n').count(), 20);
}

#[test]
fn encoding_is_deterministic() {
    let upn = UpnQr::builder(janez(), podjetje(), "SI56011006001234567", eur(dec!(150.50)))
        .purpose("Payment for services")
        .build()
        .unwrap();
    assert_eq!(upn.encode().unwrap(), upn.encode().unwrap());
}
