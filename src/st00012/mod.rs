//! Russian payment-order QR payloads (GOST R 56042, format tag `ST0001`).
//!
//! The record is a key=value list whose separator is not fixed by the
//! standard: the encoder must pick the first candidate punctuation
//! character that appears in no field value. Two of the three
//! supported codepages (Windows-1251, KOI8-R) are not UTF-8
//! compatible, so the primary output is bytes; [`Payload::encode`]
//! serves only the UTF-8 codepage. Both the separator search and the
//! byte budget of the mandatory block depend on the encoded form and
//! are therefore checked at serialization time, not at construction.

mod fields;

pub use fields::OptionalFields;

use serde::Serialize;

use crate::core::{Payload, PayloadError, rules, transcode};

/// Codepage of the encoded payload, declared right after the format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Codepage {
    Windows1251,
    Utf8,
    Koi8R,
}

impl Codepage {
    /// Single-digit code serialized after `ST0001`.
    pub fn code(&self) -> u8 {
        match self {
            Self::Windows1251 => 1,
            Self::Utf8 => 2,
            Self::Koi8R => 3,
        }
    }

    fn encoding(&self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Windows1251 => encoding_rs::WINDOWS_1251,
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Koi8R => encoding_rs::KOI8_R,
        }
    }
}

/// Separator candidates, tried in order; the first one absent from
/// every field value wins.
const SEPARATOR_CANDIDATES: &[char] = &[
    '|', '#', ';', ':', '^', '_', '~', '{', '}', '!', '$', '%', '&', '(', ')', '*', '+', ',', '/',
    '@',
];

/// Byte budget of the header plus mandatory block in the encoded form.
const MANDATORY_BYTE_CAP: usize = 300;

/// Bytes the header contributes on top of the mandatory key=value
/// pairs: the `ST0001` tag, the codepage digit, and the trailing
/// separator. Standard-specific arithmetic — keep the constant exact.
const HEADER_OVERHEAD: usize = 8;

/// A validated payment order.
#[derive(Debug, Clone, Serialize)]
pub struct RussiaPaymentOrder {
    codepage: Codepage,
    name: String,
    personal_acc: String,
    bank_name: String,
    bic: String,
    corresp_acc: String,
    optional: OptionalFields,
}

impl RussiaPaymentOrder {
    /// Construct an order from the five mandatory fields plus any
    /// optional attributes.
    ///
    /// Mandatory fields: payee name (≤160 chars), payee account (20
    /// digits), bank name (≤45 chars), bank identification code (9
    /// digits), correspondent account (20 digits).
    pub fn new(
        name: &str,
        personal_acc: &str,
        bank_name: &str,
        bic: &str,
        corresp_acc: &str,
        optional: OptionalFields,
        codepage: Codepage,
    ) -> Result<Self, PayloadError> {
        let name = name.trim().to_string();
        rules::check_not_empty("Name", &name)?;
        rules::check_len("Name", &name, 160)?;
        let personal_acc: String = personal_acc.split_whitespace().collect();
        rules::check_digits("PersonalAcc", &personal_acc, 20, 20)?;
        let bank_name = bank_name.trim().to_string();
        rules::check_not_empty("BankName", &bank_name)?;
        rules::check_len("BankName", &bank_name, 45)?;
        let bic: String = bic.split_whitespace().collect();
        rules::check_digits("BIC", &bic, 9, 9)?;
        let corresp_acc: String = corresp_acc.split_whitespace().collect();
        rules::check_digits("CorrespAcc", &corresp_acc, 20, 20)?;
        optional.validate()?;
        Ok(Self {
            codepage,
            name,
            personal_acc,
            bank_name,
            bic,
            corresp_acc,
            optional,
        })
    }

    pub fn codepage(&self) -> Codepage {
        self.codepage
    }

    fn mandatory_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("Name", &self.name),
            ("PersonalAcc", &self.personal_acc),
            ("BankName", &self.bank_name),
            ("BIC", &self.bic),
            ("CorrespAcc", &self.corresp_acc),
        ]
    }

    fn resolve_separator(&self, optional: &[(&'static str, String)]) -> Result<char, PayloadError> {
        let occupied = |sep: char| {
            self.mandatory_pairs().iter().any(|(_, v)| v.contains(sep))
                || optional.iter().any(|(_, v)| v.contains(sep))
        };
        SEPARATOR_CANDIDATES
            .iter()
            .copied()
            .find(|sep| !occupied(*sep))
            .ok_or_else(|| PayloadError::EncodingCapacity("No valid separator found.".into()))
    }

    /// Payload bytes in the selected codepage.
    pub fn encode_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        let optional = self.optional.pairs();
        let separator = self.resolve_separator(&optional)?;
        let encoding = self.codepage.encoding();

        // the cap covers the header through the trailing separator;
        // optional attributes are not counted against it
        let mut field_bytes = 0usize;
        for (key, value) in self.mandatory_pairs() {
            field_bytes += 1 + transcode::encode_exact(encoding, &format!("{key}={value}"))?.len();
        }
        if field_bytes > MANDATORY_BYTE_CAP - HEADER_OVERHEAD {
            return Err(PayloadError::EncodingCapacity(format!(
                "mandatory fields occupy {} bytes encoded; the standard allows {}",
                field_bytes + HEADER_OVERHEAD,
                MANDATORY_BYTE_CAP
            )));
        }

        let mut text = String::new();
        text.push_str("ST0001");
        text.push((b'0' + self.codepage.code()) as char);
        for (key, value) in self.mandatory_pairs() {
            text.push(separator);
            text.push_str(key);
            text.push('=');
            text.push_str(value);
        }
        for (key, value) in &optional {
            text.push(separator);
            text.push_str(key);
            text.push('=');
            text.push_str(value);
        }
        text.push(separator);
        transcode::encode_exact(encoding, &text)
    }
}

impl Payload for RussiaPaymentOrder {
    /// Payload text; defined for the UTF-8 codepage only. The other
    /// codepages produce byte sequences that are not valid UTF-8 — use
    /// [`RussiaPaymentOrder::encode_bytes`] for those.
    fn encode(&self) -> Result<String, PayloadError> {
        if self.codepage != Codepage::Utf8 {
            return Err(PayloadError::Validation(format!(
                "text output is only defined for the UTF-8 codepage, not {:?}; use encode_bytes",
                self.codepage
            )));
        }
        let bytes = self.encode_bytes()?;
        String::from_utf8(bytes).map_err(|_| {
            PayloadError::Validation("encoded payload is not valid UTF-8".into())
        })
    }
}
