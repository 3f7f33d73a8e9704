//! Property-based tests for the shared checksum and amount rules.

#![cfg(feature = "core")]

use payqr::core::{MonetaryAmount, checksum};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Build a valid German IBAN for an 18-digit BBAN by computing the
/// ISO 7064 check digits.
fn make_de_iban(bban: &str) -> String {
    // rearranged form: BBAN + "DE00", with D=13, E=14
    let mut rem = 0u32;
    for digit in bban.chars().map(|c| c.to_digit(10).unwrap()) {
        rem = (rem * 10 + digit) % 97;
    }
    for digit in [1, 3, 1, 4, 0, 0] {
        rem = (rem * 10 + digit) % 97;
    }
    let check = 98 - rem;
    format!("DE{check:02}{bban}")
}

proptest! {
    #[test]
    fn generated_ibans_pass_mod97(bban in "[0-9]{18}") {
        prop_assert!(checksum::is_valid_iban(&make_de_iban(&bban)));
    }

    #[test]
    fn any_single_digit_flip_invalidates_an_iban(
        bban in "[0-9]{18}",
        pos in 0usize..20,
        delta in 1u8..10,
    ) {
        let iban = make_de_iban(&bban);
        let mut bytes = iban.into_bytes();
        // flip one digit anywhere in the check digits or the BBAN
        let i = pos + 2;
        let digit = bytes[i] - b'0';
        bytes[i] = b'0' + (digit + delta) % 10;
        let mutated = String::from_utf8(bytes).unwrap();
        prop_assert!(!checksum::is_valid_iban(&mutated));
    }

    #[test]
    fn mod10_check_digit_round_trips(body in "[0-9]{4,26}") {
        let check = checksum::mod10_check_digit(&body).unwrap();
        let reference = format!("{body}{check}");
        prop_assert!(checksum::is_valid_qr_reference(&reference));
    }

    #[test]
    fn mod10_detects_any_digit_mutation(
        body in "[0-9]{4,26}",
        pos in 0usize..27,
        delta in 1u8..10,
    ) {
        let check = checksum::mod10_check_digit(&body).unwrap();
        let mut reference = format!("{body}{check}").into_bytes();
        let i = pos % reference.len();
        let digit = reference[i] - b'0';
        reference[i] = b'0' + (digit + delta) % 10;
        let mutated = String::from_utf8(reference).unwrap();
        prop_assert!(!checksum::is_valid_qr_reference(&mutated));
    }

    #[test]
    fn in_range_amounts_are_accepted(cents in 1u64..=99_999_999_999) {
        let value = Decimal::new(cents as i64, 2);
        let amount = MonetaryAmount::new(value, "EUR").unwrap();
        // two fraction digits, locale independent
        let text = amount.to_point_string();
        prop_assert_eq!(text.split('.').nth(1).map(str::len), Some(2));
    }

    #[test]
    fn three_fraction_digits_are_always_rejected(millis in 1u64..=999_999_999_999) {
        let value = Decimal::new(millis as i64, 3);
        // skip values whose third fraction digit is zero
        prop_assume!(millis % 10 != 0);
        prop_assert!(MonetaryAmount::new(value, "EUR").is_err());
    }
}
