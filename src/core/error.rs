use thiserror::Error;

/// Errors raised while constructing or serializing a payment payload.
///
/// Exactly one error is raised per failed operation; there is no
/// "valid with warnings" outcome. The caller corrects the input and
/// constructs a new record — nothing is retried or auto-recovered.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PayloadError {
    /// A single field violated a length, charset, numeric, or date rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A field combination is illegal for the chosen payload variant.
    #[error("illegal field combination: {0}")]
    CrossField(String),

    /// A control-digit or structural verification failed (IBAN, BIC,
    /// payment reference, creditor ID).
    #[error("checksum check failed: {0}")]
    Checksum(String),

    /// The encoded payload does not fit the capacity the standard
    /// allows, or no usable field separator exists.
    #[error("encoding capacity exceeded: {0}")]
    EncodingCapacity(String),
}
