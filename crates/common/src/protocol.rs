//! Request and response types for the hybrid encryption HTTP API.
//!
//! All fields are serialised in snake_case. Every value is either UTF-8 text or
//! standard Base64.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Encrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /hybrid/encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptRequest {
    /// Text to encrypt.
    pub plain_text: String,
    /// Base64 256-bit AES key to encrypt under.
    pub plain_key: String,
}

/// Successful response body for `POST /hybrid/encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Base64 AES-GCM output.
    pub cipher_text: String,
    /// Base64 RSA-wrapped copy of the request's `plain_key`.
    pub cipher_key: String,
}

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /hybrid/decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptRequest {
    /// Base64 AES-GCM output from `/hybrid/encrypt`.
    pub cipher_text: String,
    /// Base64 RSA-wrapped key from `/hybrid/encrypt`.
    pub cipher_key: String,
}

/// Successful response body for `POST /hybrid/decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    /// Recovered text.
    pub plain_text: String,
    /// Recovered Base64 AES key.
    pub plain_key: String,
}

// ---------------------------------------------------------------------------
// Key endpoint
// ---------------------------------------------------------------------------

/// Response body for `GET /hybrid/key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateKeyResponse {
    /// Fresh Base64 256-bit AES key.
    pub plain_key: String,
    /// The same key, RSA-wrapped under the service public key.
    pub rsa_encrypted_key: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status. Always `"ok"` once the server is accepting requests.
    pub status: String,
    /// Nonce mode in use: `"random"` or `"legacy_zero"`.
    pub nonce_mode: String,
}
