//! # payqr
//!
//! Payload generation for the major European and Russian payment QR
//! standards: the German/Austrian BezahlCode scheme, the EPC credit
//! transfer ("Girocode"), the Swiss QR-bill, the Russian payment order
//! (GOST R 56042, format tag `ST0001`), and the Slovenian UPN QR.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Every record validates its fields at construction and is
//! immutable afterwards; [`core::Payload::encode`] is a pure function of
//! the record. The crate emits payload strings (or, for codepages that
//! are not UTF-8 compatible, bytes) plus the rendering hints the
//! external QR symbol encoder must honor. It does not compute QR
//! modules or error-correction codewords, and it does not parse
//! payloads back.
//!
//! ## Quick Start
//!
//! ```rust
//! use payqr::core::Payload;
//! use payqr::swissqr::{Contact, Currency, SwissIban, SwissQrBill};
//! use rust_decimal_macros::dec;
//!
//! let creditor = Contact::structured(
//!     "Max Muster & Söhne",
//!     Some("Musterstrasse"),
//!     Some("123"),
//!     "3000",
//!     "Bern",
//!     "CH",
//! )
//! .unwrap();
//!
//! let bill = SwissQrBill::builder(
//!     SwissIban::new("CH93 0076 2011 6238 5295 7").unwrap(),
//!     creditor,
//!     Currency::Chf,
//! )
//! .amount(dec!(199.95))
//! .build()
//! .unwrap();
//!
//! assert!(bill.encode().unwrap().starts_with("SPC\r\n0200\r\n1\r\n"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Shared amount type, validation rules, checksums |
//! | `bezahlcode` | BezahlCode `bank://` payment and contact payloads |
//! | `girocode` | EPC credit-transfer QR payloads |
//! | `swissqr` | Swiss QR-bill payloads |
//! | `st00012` | Russian payment-order payloads (UTF-8, Windows-1251, KOI8-R) |
//! | `upnqr` | Slovenian UPN QR payloads |
//! | `all` (default) | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "bezahlcode")]
pub mod bezahlcode;

#[cfg(feature = "girocode")]
pub mod girocode;

#[cfg(feature = "swissqr")]
pub mod swissqr;

#[cfg(feature = "st00012")]
pub mod st00012;

#[cfg(feature = "upnqr")]
pub mod upnqr;

// Re-export the shared contract at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::{EccLevel, EciMode, MonetaryAmount, Payload, PayloadError, RenderHints};
