//! Error types for the hybrid crypto core.
//!
//! Variants carry no key material and no plaintext. Authentication failures are
//! deliberately collapsed into a single variant so callers cannot learn *why*
//! a ciphertext was rejected.

use thiserror::Error;

use crate::cipher::KEY_LEN;

/// Malformed RSA key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyFormatError {
    /// The key text is not valid standard Base64.
    #[error("key material is not valid base64")]
    InvalidBase64,

    /// The bytes are not an X.509 SubjectPublicKeyInfo RSA key.
    #[error("invalid RSA public key (expected X.509 SubjectPublicKeyInfo DER)")]
    InvalidPublicKey,

    /// The bytes are not a PKCS#8 RSA private key.
    #[error("invalid RSA private key (expected PKCS#8 DER)")]
    InvalidPrivateKey,

    /// The private key does not belong to the public key it was paired with.
    #[error("RSA private key does not match the public key")]
    MismatchedKeyPair,
}

/// Failures of the symmetric cipher or the RSA key wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The symmetric key is the wrong length.
    #[error("invalid symmetric key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// An input that should be Base64 is not.
    #[error("input is not valid base64")]
    InvalidBase64,

    /// The ciphertext is shorter than its nonce and tag.
    #[error("ciphertext is truncated")]
    Truncated,

    /// AES-GCM encryption failed, or decryption failed authentication.
    #[error("aead operation failed")]
    AeadFailure,

    /// The decrypted payload is not UTF-8 text.
    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    /// The payload does not fit in a single PKCS#1 v1.5 block for this modulus.
    #[error("payload of {len} bytes exceeds the {max}-byte RSA PKCS#1 v1.5 limit")]
    PayloadTooLarge {
        /// Length of the rejected payload.
        len: usize,
        /// Largest payload the modulus accepts.
        max: usize,
    },

    /// RSA encryption or decryption failed (including padding errors).
    #[error("rsa operation failed")]
    RsaFailure,
}

/// Error returned by the text-in/text-out operations in [`crate::hybrid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HybridError {
    /// An RSA key supplied as Base64 DER could not be decoded.
    #[error(transparent)]
    KeyFormat(#[from] KeyFormatError),

    /// Symmetric encryption, key wrapping or unwrapping failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
