//! Limits applied to every `/hybrid/*` request.
//!
//! Payloads are Base64 text inside JSON, so the body cap bounds the plaintext
//! a single call can encrypt or decrypt.

use std::time::Duration;

/// Upper bound on one encrypt, decrypt or key-issue request, RSA work included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest JSON body accepted by the hybrid endpoints (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;
