#![cfg(feature = "st00012")]

use chrono::NaiveDate;
use payqr::core::{Payload, PayloadError};
use payqr::st00012::*;

fn sberbank_order(optional: OptionalFields, codepage: Codepage) -> RussiaPaymentOrder {
    RussiaPaymentOrder::new(
        "ООО «Три кита»",
        "40702810138250123017",
        "ОАО \"Банк\"",
        "044525225",
        "30101810400000000225",
        optional,
        codepage,
    )
    .unwrap()
}

#[test]
fn utf8_payload_layout() {
    let fields = OptionalFields {
        sum: Some("100000".into()),
        purpose: Some("Оплата по счету 123".into()),
        payee_inn: Some("7707083893".into()),
        ..Default::default()
    };
    let payload = sberbank_order(fields, Codepage::Utf8).encode().unwrap();
    assert_eq!(
        payload,
        "ST00012|Name=ООО «Три кита»|PersonalAcc=40702810138250123017\
         |BankName=ОАО \"Банк\"|BIC=044525225|CorrespAcc=30101810400000000225\
         |Sum=100000|Purpose=Оплата по счету 123|PayeeINN=7707083893|"
    );
}

#[test]
fn optional_dates_render_dotted() {
    let fields = OptionalFields {
        doc_no: Some("42".into()),
        doc_date: NaiveDate::from_ymd_opt(2026, 2, 14),
        ..Default::default()
    };
    let payload = sberbank_order(fields, Codepage::Utf8).encode().unwrap();
    assert!(payload.contains("|DocNo=42|DocDate=14.02.2026|"));
}

#[test]
fn separator_resolution_picks_hash() {
    // every candidate except '#' occurs in a field value
    let fields = OptionalFields {
        purpose: Some("|;:^_~{}!$%&()*+,/@".into()),
        ..Default::default()
    };
    let payload = sberbank_order(fields, Codepage::Utf8).encode().unwrap();
    assert!(payload.starts_with("ST00012#Name="));
    assert!(payload.ends_with("#"));
}

#[test]
fn exhausted_separators_fail() {
    let fields = OptionalFields {
        purpose: Some("|#;:^_~{}!$%&()*+,/@".into()),
        ..Default::default()
    };
    let result = sberbank_order(fields, Codepage::Utf8).encode_bytes();
    let err = result.unwrap_err();
    assert!(matches!(err, PayloadError::EncodingCapacity(_)));
    assert!(err.to_string().contains("No valid separator found."));
}

#[test]
fn mandatory_byte_cap_depends_on_codepage() {
    // 120 Cyrillic characters: two bytes each in UTF-8, one in
    // Windows-1251 — the same record passes or fails with the codepage
    let build = |codepage| {
        RussiaPaymentOrder::new(
            &"П".repeat(120),
            "40702810138250123017",
            "Банк",
            "044525225",
            "30101810400000000225",
            OptionalFields::default(),
            codepage,
        )
        .unwrap()
    };

    let result = build(Codepage::Utf8).encode_bytes();
    assert!(matches!(result, Err(PayloadError::EncodingCapacity(_))));

    assert!(build(Codepage::Windows1251).encode_bytes().is_ok());
}

#[test]
fn ascii_mandatory_fields_at_the_limit_fail() {
    // name 160 + bank 45 + accounts and BIC max out the block
    let result = RussiaPaymentOrder::new(
        &"N".repeat(160),
        "40702810138250123017",
        &"B".repeat(45),
        "044525225",
        "30101810400000000225",
        OptionalFields::default(),
        Codepage::Utf8,
    )
    .unwrap()
    .encode_bytes();
    assert!(matches!(result, Err(PayloadError::EncodingCapacity(_))));
}

#[test]
fn koi8_r_encodes_plain_cyrillic() {
    // KOI8-R has no guillemets, so the name stays plain here
    let bytes = RussiaPaymentOrder::new(
        "ЗАО Ромашка",
        "40702810138250123017",
        "Банк",
        "044525225",
        "30101810400000000225",
        OptionalFields::default(),
        Codepage::Koi8R,
    )
    .unwrap()
    .encode_bytes()
    .unwrap();
    assert!(bytes.starts_with(b"ST00013|Name="));
}

#[test]
fn koi8_r_rejects_characters_outside_the_codepage() {
    // the guillemets in the payee name have no KOI8-R mapping
    let result = sberbank_order(OptionalFields::default(), Codepage::Koi8R).encode_bytes();
    assert!(result.is_err());
}

#[test]
fn text_entry_point_is_utf8_only() {
    let result = sberbank_order(OptionalFields::default(), Codepage::Koi8R).encode();
    assert!(result.is_err());
}

#[test]
fn unmappable_characters_fail_strictly() {
    let fields = OptionalFields {
        purpose: Some("snowman ☃".into()),
        ..Default::default()
    };
    let result = sberbank_order(fields, Codepage::Windows1251).encode_bytes();
    assert!(result.is_err());
}

#[test]
fn encoding_is_deterministic() {
    let order = sberbank_order(OptionalFields::default(), Codepage::Utf8);
    assert_eq!(order.encode_bytes().unwrap(), order.encode_bytes().unwrap());
}
