use serde::Serialize;

use super::error::PayloadError;

/// QR error-correction level the symbol encoder must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EccLevel {
    Low,
    Medium,
    Quartile,
    High,
}

/// Extended-channel-interpretation declaration for the symbol encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EciMode {
    Iso8859_1,
    Iso8859_2,
    Utf8,
}

impl EciMode {
    /// ECI assignment number per ISO/IEC 18004.
    pub fn designator(&self) -> u32 {
        match self {
            Self::Iso8859_1 => 3,
            Self::Iso8859_2 => 4,
            Self::Utf8 => 26,
        }
    }
}

/// Rendering constraints a payment standard imposes on the QR symbol.
///
/// The payload engine never draws modules itself; these hints travel to
/// the external symbol encoder, which must honor them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderHints {
    /// Fixed symbol version, if the standard pins one.
    pub version: Option<u8>,
    /// Error-correction level.
    pub ecc: EccLevel,
    /// Character-encoding declaration, if the standard pins one.
    pub eci: Option<EciMode>,
}

impl Default for RenderHints {
    fn default() -> Self {
        Self {
            version: None,
            ecc: EccLevel::Medium,
            eci: None,
        }
    }
}

/// A validated, immutable payment payload.
///
/// Records are constructed through their smart constructors, which
/// validate every field; serialization afterwards is deterministic —
/// two calls on the same record produce byte-identical output.
pub trait Payload {
    /// Render the exact wire-format payload string.
    ///
    /// Most formats can no longer fail here; the Russian payment order
    /// defers its separator search and byte-budget check to this point
    /// because both depend on the encoded byte length.
    fn encode(&self) -> Result<String, PayloadError>;

    /// Constraints the external QR symbol encoder must honor.
    fn render_hints(&self) -> RenderHints {
        RenderHints::default()
    }
}
