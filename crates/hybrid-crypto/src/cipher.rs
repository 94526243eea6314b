//! AES-256-GCM encryption and decryption of text payloads.
//!
//! # Nonce handling
//!
//! [`NonceMode::Random`] draws a fresh 96-bit nonce from the OS CSPRNG for every
//! call and transports it in front of the AEAD output:
//!
//! ```text
//! base64(nonce || ciphertext || tag)
//! ```
//!
//! [`NonceMode::LegacyZero`] reproduces the legacy wire format: an all-zero IV
//! that is never transmitted, giving `base64(ciphertext || tag)`. GCM nonce reuse
//! breaks both confidentiality and authentication, so a key used in this mode
//! must never encrypt more than one message.

use std::fmt;

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::CryptoError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// How the AES-GCM nonce is chosen and transported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonceMode {
    /// Fresh random nonce per message, prepended to the ciphertext.
    #[default]
    Random,
    /// Fixed all-zero nonce, not transmitted. Compatibility only.
    LegacyZero,
}

impl NonceMode {
    /// Configuration spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            NonceMode::Random => "random",
            NonceMode::LegacyZero => "legacy_zero",
        }
    }

    /// Bytes this mode adds to a plaintext of any length.
    pub fn overhead(&self) -> usize {
        match self {
            NonceMode::Random => NONCE_LEN + TAG_LEN,
            NonceMode::LegacyZero => TAG_LEN,
        }
    }
}

impl fmt::Display for NonceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 256-bit AES key.
///
/// The buffer is overwritten with zeroes on drop, and `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey(Box<[u8; KEY_LEN]>);

impl SymmetricKey {
    /// Generate a fresh random key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut buf = Box::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut buf[..]);
        Self(buf)
    }

    /// Copy raw key bytes into a new key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] unless `bytes` is exactly
    /// [`KEY_LEN`] bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Decode a key from standard Base64.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidBase64`] for malformed text and
    /// [`CryptoError::InvalidKeyLength`] if the decoded key is not 32 bytes.
    pub fn from_base64(text: &str) -> Result<Self, CryptoError> {
        let raw = Zeroizing::new(
            STANDARD
                .decode(text.trim())
                .map_err(|_| CryptoError::InvalidBase64)?,
        );
        Self::from_bytes(&raw)
    }

    /// Encode the key as standard Base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0[..])
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for SymmetricKey {}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// AES-256-GCM cipher configured with a [`NonceMode`].
///
/// Holds no key material. Every call builds its own cipher context, so a
/// single value can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymmetricCipher {
    mode: NonceMode,
}

impl SymmetricCipher {
    /// Create a cipher using the given nonce mode.
    pub fn new(mode: NonceMode) -> Self {
        Self { mode }
    }

    /// The nonce mode this cipher was built with.
    pub fn mode(&self) -> NonceMode {
        self.mode
    }

    /// Generate a fresh random 256-bit key.
    pub fn generate_key() -> SymmetricKey {
        SymmetricKey::generate()
    }

    /// Encrypt UTF-8 text and return the Base64 AEAD output.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::AeadFailure`] on an internal AEAD error.
    pub fn encrypt(&self, plaintext: &str, key: &SymmetricKey) -> Result<String, CryptoError> {
        let sealed = self.seal(plaintext.as_bytes(), key)?;
        Ok(STANDARD.encode(sealed))
    }

    /// Decrypt Base64 AEAD output back into UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidBase64`] for malformed input,
    /// [`CryptoError::Truncated`] if the input cannot hold a nonce and tag,
    /// [`CryptoError::AeadFailure`] if authentication fails (wrong key or
    /// tampered data), and [`CryptoError::InvalidUtf8`] if the recovered bytes
    /// are not text.
    pub fn decrypt(&self, ciphertext_b64: &str, key: &SymmetricKey) -> Result<String, CryptoError> {
        let data = STANDARD
            .decode(ciphertext_b64.trim())
            .map_err(|_| CryptoError::InvalidBase64)?;
        let plaintext = self.open(&data, key)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }

    /// Encrypt raw bytes, returning the AEAD output laid out per [`NonceMode`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::AeadFailure`] on an internal AEAD error.
    pub fn seal(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<Vec<u8>, CryptoError> {
        let cipher = build_cipher(key)?;
        match self.mode {
            NonceMode::Random => {
                let mut nonce_bytes = [0u8; NONCE_LEN];
                OsRng.fill_bytes(&mut nonce_bytes);
                let ciphertext = cipher
                    .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
                    .map_err(|_| CryptoError::AeadFailure)?;

                let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
                out.extend_from_slice(&nonce_bytes);
                out.extend_from_slice(&ciphertext);
                Ok(out)
            }
            NonceMode::LegacyZero => cipher
                .encrypt(Nonce::from_slice(&[0u8; NONCE_LEN]), plaintext)
                .map_err(|_| CryptoError::AeadFailure),
        }
    }

    /// Decrypt and authenticate output produced by [`SymmetricCipher::seal`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Truncated`] if `data` is shorter than the mode's
    /// overhead and [`CryptoError::AeadFailure`] if authentication fails.
    pub fn open(&self, data: &[u8], key: &SymmetricKey) -> Result<Vec<u8>, CryptoError> {
        if data.len() < self.mode.overhead() {
            return Err(CryptoError::Truncated);
        }
        let cipher = build_cipher(key)?;
        let (nonce_bytes, ciphertext) = match self.mode {
            NonceMode::Random => data.split_at(NONCE_LEN),
            NonceMode::LegacyZero => (&[0u8; NONCE_LEN][..], data),
        };
        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CryptoError::AeadFailure)
    }
}

fn build_cipher(key: &SymmetricKey) -> Result<Aes256Gcm, CryptoError> {
    Aes256Gcm::new_from_slice(&key.as_bytes()[..])
        .map_err(|_| CryptoError::InvalidKeyLength(key.as_bytes().len()))
}
