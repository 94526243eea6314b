//! Text-in/text-out hybrid operations.
//!
//! Every input and output is either UTF-8 text or standard Base64, so callers
//! can move values straight between these functions and a JSON body.
//!
//! The free functions take keys as Base64 DER and use the default
//! [`NonceMode`]. [`HybridService`] binds a cipher configuration and a
//! [`KeyProvider`] for the composite seal/open/issue flows.
//!
//! # Legacy transport
//!
//! Under [`NonceMode::LegacyZero`] the service speaks the legacy wire format
//! end to end: payloads carry no nonce, and the RSA block wraps the UTF-8
//! bytes of the Base64 key text (44 bytes) instead of the raw 32 key bytes.
//! [`HybridService::open`] in that mode accepts either wrapping.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::Zeroizing;

use crate::cipher::{NonceMode, SymmetricCipher, SymmetricKey};
use crate::error::{CryptoError, HybridError};
use crate::keys::KeyProvider;
use crate::wrap;

/// Generate a fresh 256-bit key, returned as Base64.
pub fn generate_symmetric_key() -> String {
    SymmetricCipher::generate_key().to_base64()
}

/// Wrap a Base64 key under a Base64 SPKI DER public key.
///
/// # Errors
///
/// Returns [`HybridError::KeyFormat`] for an unusable public key and
/// [`HybridError::Crypto`] if the key bytes cannot be wrapped.
pub fn wrap_key(plain_key_b64: &str, public_key_b64: &str) -> Result<String, HybridError> {
    let public_key = wrap::decode_public_key(public_key_b64)?;
    Ok(wrap::wrap(plain_key_b64, &public_key)?)
}

/// Encrypt `plaintext` under a Base64 key.
///
/// # Errors
///
/// Returns [`HybridError::Crypto`] if the key is malformed or encryption fails.
pub fn encrypt(plaintext: &str, plain_key_b64: &str) -> Result<String, HybridError> {
    let key = SymmetricKey::from_base64(plain_key_b64)?;
    Ok(SymmetricCipher::default().encrypt(plaintext, &key)?)
}

/// Decrypt Base64 ciphertext produced by [`encrypt`].
///
/// Always uses [`NonceMode::Random`]; legacy ciphertexts go through
/// [`HybridService::decrypt`].
///
/// # Errors
///
/// Returns [`HybridError::Crypto`] if the key or ciphertext is malformed or
/// authentication fails.
pub fn decrypt(cipher_text_b64: &str, plain_key_b64: &str) -> Result<String, HybridError> {
    let key = SymmetricKey::from_base64(plain_key_b64)?;
    Ok(SymmetricCipher::default().decrypt(cipher_text_b64, &key)?)
}

/// Unwrap a Base64 wrapped key with a Base64 PKCS#8 DER private key.
///
/// # Errors
///
/// Returns [`HybridError::KeyFormat`] for an unusable private key and
/// [`HybridError::Crypto`] if unwrapping fails.
pub fn unwrap_key(wrapped_key_b64: &str, private_key_b64: &str) -> Result<String, HybridError> {
    let private_key = wrap::decode_private_key(private_key_b64)?;
    Ok(wrap::unwrap(wrapped_key_b64, &private_key)?)
}

/// Length of the Base64 text of a 256-bit key, as wrapped by the legacy transport.
const LEGACY_WRAPPED_KEY_LEN: usize = 44;

/// A freshly issued key and its wrapped form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedKey {
    /// Base64 symmetric key.
    pub plain_key: String,
    /// Base64 RSA-wrapped copy of `plain_key`.
    pub wrapped_key: String,
}

/// Output of [`HybridService::seal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Base64 AEAD output.
    pub cipher_text: String,
    /// Base64 RSA-wrapped symmetric key.
    pub cipher_key: String,
}

/// Output of [`HybridService::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opened {
    /// Recovered plaintext.
    pub plain_text: String,
    /// Recovered Base64 symmetric key.
    pub plain_key: String,
}

/// Hybrid encryption bound to a nonce mode and an RSA keypair.
///
/// Cheap to clone; the key provider is shared behind an `Arc`.
#[derive(Clone)]
pub struct HybridService {
    cipher: SymmetricCipher,
    keys: Arc<dyn KeyProvider>,
}

impl HybridService {
    /// Create a service over `keys` using `mode` for payload encryption.
    pub fn new(mode: NonceMode, keys: Arc<dyn KeyProvider>) -> Self {
        Self {
            cipher: SymmetricCipher::new(mode),
            keys,
        }
    }

    /// Nonce mode used for payload encryption.
    pub fn nonce_mode(&self) -> NonceMode {
        self.cipher.mode()
    }

    /// Generate a key and wrap it with the provider's public key.
    ///
    /// # Errors
    ///
    /// Returns [`HybridError::Crypto`] if wrapping fails.
    pub fn issue_key(&self) -> Result<IssuedKey, HybridError> {
        let key = SymmetricCipher::generate_key();
        Ok(IssuedKey {
            wrapped_key: self.wrap_for_transport(&key)?,
            plain_key: key.to_base64(),
        })
    }

    /// Encrypt `plaintext` under a Base64 key using this service's nonce mode.
    ///
    /// # Errors
    ///
    /// Returns [`HybridError::Crypto`] if the key is malformed or encryption fails.
    pub fn encrypt(&self, plaintext: &str, plain_key_b64: &str) -> Result<String, HybridError> {
        let key = SymmetricKey::from_base64(plain_key_b64)?;
        Ok(self.cipher.encrypt(plaintext, &key)?)
    }

    /// Decrypt Base64 ciphertext using this service's nonce mode.
    ///
    /// # Errors
    ///
    /// Returns [`HybridError::Crypto`] if the key or ciphertext is malformed or
    /// authentication fails.
    pub fn decrypt(
        &self,
        cipher_text_b64: &str,
        plain_key_b64: &str,
    ) -> Result<String, HybridError> {
        let key = SymmetricKey::from_base64(plain_key_b64)?;
        Ok(self.cipher.decrypt(cipher_text_b64, &key)?)
    }

    /// Encrypt `plaintext` under the caller's key and wrap that key for transport.
    ///
    /// # Errors
    ///
    /// Returns [`HybridError::Crypto`] if the key is malformed, or if
    /// encryption or wrapping fails.
    pub fn seal(&self, plaintext: &str, plain_key_b64: &str) -> Result<Sealed, HybridError> {
        let key = SymmetricKey::from_base64(plain_key_b64)?;
        Ok(Sealed {
            cipher_text: self.cipher.encrypt(plaintext, &key)?,
            cipher_key: self.wrap_for_transport(&key)?,
        })
    }

    /// Unwrap the transported key with the provider's private key, then decrypt.
    ///
    /// # Errors
    ///
    /// Returns [`HybridError::Crypto`] if unwrapping fails, if the recovered key
    /// is not a 256-bit key, or if decryption fails.
    pub fn open(&self, cipher_text_b64: &str, cipher_key_b64: &str) -> Result<Opened, HybridError> {
        let key = self.unwrap_from_transport(cipher_key_b64)?;
        Ok(Opened {
            plain_text: self.cipher.decrypt(cipher_text_b64, &key)?,
            plain_key: key.to_base64(),
        })
    }

    fn wrap_for_transport(&self, key: &SymmetricKey) -> Result<String, HybridError> {
        let public_key = self.keys.public_key();
        let wrapped = match self.cipher.mode() {
            NonceMode::Random => wrap::wrap_bytes(&key.as_bytes()[..], public_key)?,
            NonceMode::LegacyZero => {
                let text = Zeroizing::new(key.to_base64());
                wrap::wrap_bytes(text.as_bytes(), public_key)?
            }
        };
        Ok(STANDARD.encode(wrapped))
    }

    fn unwrap_from_transport(&self, cipher_key_b64: &str) -> Result<SymmetricKey, HybridError> {
        let wrapped = STANDARD
            .decode(cipher_key_b64.trim())
            .map_err(|_| CryptoError::InvalidBase64)?;
        let recovered = wrap::unwrap_bytes(&wrapped, self.keys.private_key())?;
        match self.cipher.mode() {
            NonceMode::LegacyZero if recovered.len() == LEGACY_WRAPPED_KEY_LEN => {
                let invalid = || CryptoError::InvalidKeyLength(recovered.len());
                let text = std::str::from_utf8(&recovered).map_err(|_| invalid())?;
                Ok(SymmetricKey::from_base64(text).map_err(|_| invalid())?)
            }
            _ => Ok(SymmetricKey::from_bytes(&recovered)?),
        }
    }
}

impl std::fmt::Debug for HybridService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridService")
            .field("nonce_mode", &self.cipher.mode())
            .finish_non_exhaustive()
    }
}
