//! UTF-8 to legacy-codepage transcoding for standards that predate UTF-8.
//!
//! The translation tables in `encoding_rs` are static and read-only, so
//! concurrent use needs no synchronization. Transcoding is strict:
//! an unmappable character fails the operation instead of being
//! replaced, because the payment terminals reading these codes reject
//! substitution bytes.

use encoding_rs::Encoding;

use super::error::PayloadError;

/// Encode `text` into the given codepage, failing on any character the
/// codepage cannot represent.
pub fn encode_exact(encoding: &'static Encoding, text: &str) -> Result<Vec<u8>, PayloadError> {
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(PayloadError::Validation(format!(
            "text contains characters not representable in {}",
            encoding.name()
        )));
    }
    Ok(bytes.into_owned())
}
