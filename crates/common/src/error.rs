//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::CryptoFailure`] → 422
/// - [`ServiceError::Internal`] → 500
///
/// Messages are safe to return to callers; they never carry key material,
/// plaintext, or the underlying cause of a cryptographic failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: bad Base64 or a wrong key length.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The input was well-formed but the cryptographic operation rejected it
    /// (authentication failure, padding failure, oversized payload).
    #[error("crypto failure: {0}")]
    CryptoFailure(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::CryptoFailure(_) => 422,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code for the error response body.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::CryptoFailure(_) => "crypto_failure",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// The caller-facing message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest(m)
            | ServiceError::CryptoFailure(m)
            | ServiceError::Internal(m) => m,
        }
    }
}
