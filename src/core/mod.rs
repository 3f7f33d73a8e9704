//! Shared validation rules, checksum algorithms, and the payload contract.
//!
//! Everything the five format modules have in common lives here: the
//! monetary amount type, the pain.001-derived character set, the IBAN,
//! BIC, Mod-10 and creditor-ID control checks, the ISO country and
//! currency tables, and the [`Payload`] trait the external QR symbol
//! encoder consumes.

pub mod amount;
pub mod checksum;
pub mod countries;
pub mod currencies;
mod error;
mod payload;
pub mod rules;
#[cfg(any(feature = "girocode", feature = "st00012"))]
pub mod transcode;

pub use amount::MonetaryAmount;
pub use error::PayloadError;
pub use payload::{EccLevel, EciMode, Payload, RenderHints};
