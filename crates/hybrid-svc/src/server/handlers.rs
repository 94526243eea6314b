//! Axum request handlers for all service endpoints.
//!
//! Failures never carry a usable value and never reveal *why* a cryptographic
//! operation failed; the cause is logged at `warn` without key material.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, ErrorResponse,
    GenerateKeyResponse, HealthResponse,
};
use common::ServiceError;
use hybrid_crypto::{CryptoError, HybridError};
use tracing::{debug, warn};

use super::state::AppState;

/// `POST /hybrid/encrypt`: encrypt `plain_text` under `plain_key` and wrap the key.
pub async fn encrypt(State(state): State<AppState>, Json(req): Json<EncryptRequest>) -> Response {
    match state.hybrid.seal(&req.plain_text, &req.plain_key) {
        Ok(sealed) => {
            debug!(cipher_text_len = sealed.cipher_text.len(), "payload sealed");
            let body = EncryptResponse {
                cipher_text: sealed.cipher_text,
                cipher_key: sealed.cipher_key,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "encryption failed");
            error_response(encrypt_error(&e))
        }
    }
}

/// `POST /hybrid/decrypt`: unwrap `cipher_key` with the service private key,
/// then decrypt `cipher_text`.
pub async fn decrypt(State(state): State<AppState>, Json(req): Json<DecryptRequest>) -> Response {
    match state.hybrid.open(&req.cipher_text, &req.cipher_key) {
        Ok(opened) => {
            let body = DecryptResponse {
                plain_text: opened.plain_text,
                plain_key: opened.plain_key,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "decryption failed");
            error_response(decrypt_error(&e))
        }
    }
}

/// `GET /hybrid/key`: issue a fresh AES key together with its wrapped form.
pub async fn generate_key(State(state): State<AppState>) -> Response {
    match state.hybrid.issue_key() {
        Ok(issued) => {
            let body = GenerateKeyResponse {
                plain_key: issued.plain_key,
                rsa_encrypted_key: issued.wrapped_key,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "key issuance failed");
            error_response(ServiceError::Internal("key generation failed".into()))
        }
    }
}

/// `GET /health`: liveness check.
///
/// The keypair is decoded before the server binds, so a running server is healthy.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        nonce_mode: state.hybrid.nonce_mode().to_string(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Map an encrypt-path failure. Only a malformed `plain_key` is the caller's fault.
fn encrypt_error(err: &HybridError) -> ServiceError {
    match err {
        HybridError::Crypto(CryptoError::InvalidBase64 | CryptoError::InvalidKeyLength(_)) => {
            ServiceError::BadRequest("plain_key must be a base64-encoded 256-bit key".into())
        }
        _ => ServiceError::Internal("encryption failed".into()),
    }
}

/// Map a decrypt-path failure. Everything past Base64 decoding collapses into
/// one indistinguishable crypto failure.
fn decrypt_error(err: &HybridError) -> ServiceError {
    match err {
        HybridError::Crypto(CryptoError::InvalidBase64) => {
            ServiceError::BadRequest("cipher_text and cipher_key must be base64".into())
        }
        HybridError::Crypto(_) => ServiceError::CryptoFailure("decryption failed".into()),
        HybridError::KeyFormat(_) => ServiceError::Internal("decryption failed".into()),
    }
}

fn error_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.code(), err.message()))).into_response()
}
