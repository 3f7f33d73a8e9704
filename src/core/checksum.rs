//! Control-digit algorithms: ISO 7064 mod-97 for IBANs, structural BIC
//! and SEPA creditor-ID patterns, the QR-IBAN range predicate, and the
//! table-driven Mod-10 walk used by Swiss payment references.

/// Strip spaces and hyphens and uppercase, the normal form every
/// account check operates on.
pub fn normalize_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

/// ISO 7064 mod-97 IBAN verification over the normalized form.
pub fn is_valid_iban(iban: &str) -> bool {
    let iban = normalize_iban(iban);
    let bytes = iban.as_bytes();
    if !(15..=34).contains(&bytes.len()) {
        return false;
    }
    if !bytes[..2].iter().all(|b| b.is_ascii_uppercase())
        || !bytes[2..4].iter().all(|b| b.is_ascii_digit())
        || !bytes[4..].iter().all(|b| b.is_ascii_alphanumeric())
    {
        return false;
    }
    mod97(&iban) == 1
}

/// Remainder of the rearranged IBAN read as a big number, computed
/// incrementally: digits contribute one decimal place, letters (A=10 …
/// Z=35) two.
fn mod97(iban: &str) -> u32 {
    let rotated = iban[4..].chars().chain(iban[..4].chars());
    let mut rem: u32 = 0;
    for c in rotated {
        // structure is checked by the caller; alphanumeric only
        let v = c.to_digit(36).unwrap_or(0);
        rem = if v < 10 {
            (rem * 10 + v) % 97
        } else {
            (rem * 100 + v) % 97
        };
    }
    rem
}

/// Whether the institution identifier (positions 5–9) lies in the
/// range 30000–31999 reserved for QR-IBANs.
pub fn is_qr_iban(iban: &str) -> bool {
    let iban = normalize_iban(iban);
    if iban.len() < 9 {
        return false;
    }
    iban[4..9]
        .parse::<u32>()
        .map(|iid| (30000..=31999).contains(&iid))
        .unwrap_or(false)
}

/// Structural BIC check: 6 letters (institution + country), 2
/// alphanumeric location characters, optional 3-character branch.
pub fn is_valid_bic(bic: &str) -> bool {
    let bic = bic.replace(' ', "").to_uppercase();
    let b = bic.as_bytes();
    if b.len() != 8 && b.len() != 11 {
        return false;
    }
    b[..6].iter().all(|c| c.is_ascii_uppercase())
        && b[6..].iter().all(|c| c.is_ascii_alphanumeric())
}

/// Carry table of the recursive ESR Mod-10 algorithm.
const MOD10_TABLE: [u8; 10] = [0, 9, 4, 6, 8, 2, 7, 1, 3, 5];

/// Swiss QR-reference check: digits only, at most 27 characters, and
/// the Mod-10 walk over all but the last digit must reproduce the last
/// digit.
pub fn is_valid_qr_reference(reference: &str) -> bool {
    let digits = reference.as_bytes();
    if digits.len() < 2 || digits.len() > 27 {
        return false;
    }
    if !digits.iter().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let mut carry = 0u8;
    for &b in &digits[..digits.len() - 1] {
        carry = MOD10_TABLE[usize::from((b - b'0' + carry) % 10)];
    }
    (10 - carry) % 10 == digits[digits.len() - 1] - b'0'
}

/// Compute the Mod-10 check digit for a digit string.
pub fn mod10_check_digit(digits: &str) -> Option<u8> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut carry = 0u8;
    for b in digits.bytes() {
        carry = MOD10_TABLE[usize::from((b - b'0' + carry) % 10)];
    }
    Some((10 - carry) % 10)
}

/// Characters the SEPA identifier set admits besides letters and digits.
fn is_sepa_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '+' | '?' | '/' | '-' | ':' | '(' | ')' | '.' | ',' | '\'')
}

/// Structural SEPA creditor-ID check: 2 letters, 2 check digits, a
/// 3-character business code, then 1–28 national identifier characters.
pub fn is_valid_creditor_id(id: &str) -> bool {
    let chars: Vec<char> = id.chars().collect();
    if !(8..=35).contains(&chars.len()) {
        return false;
    }
    chars[0].is_ascii_alphabetic()
        && chars[1].is_ascii_alphabetic()
        && chars[2].is_ascii_digit()
        && chars[3].is_ascii_digit()
        && chars[4..].iter().all(|c| is_sepa_id_char(*c))
}

/// Structural SEPA mandate-ID check: 1–35 identifier characters.
pub fn is_valid_mandate_id(id: &str) -> bool {
    let len = id.chars().count();
    (1..=35).contains(&len) && id.chars().all(is_sepa_id_char)
}
