//! RSA key material: the [`KeyProvider`] seam and its static implementation.
//!
//! The keypair is parsed once at startup and never mutated afterwards, so
//! providers hand out plain shared references with no locking.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

use crate::error::KeyFormatError;
use crate::wrap::{decode_private_key, decode_public_key};

/// Demonstration 1024-bit RSA public key (Base64 X.509 SubjectPublicKeyInfo DER).
///
/// Publicly known. Not for production traffic.
pub const DEMO_RSA_PUBLIC_1024: &str = "MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQCSAsbTSVBfsbWfki1iop2LGCI+70UWaXoWhzcVoazg/jblSx33vxQC4kdPqJ3RugJ+od/bq7M90l7Wm/FGH0LmnOn/awusnDFOQCRG2S60bsqmlmJthvbPXtRaMuf8MLxzEbXvy7+AjG42tIqoEmOHzJexrfBS2NCPACWklTO9bwIDAQAB";

/// Demonstration 1024-bit RSA private key (Base64 PKCS#8 DER).
///
/// Publicly known. Not for production traffic.
pub const DEMO_RSA_PRIVATE_1024: &str = "MIICdgIBADANBgkqhkiG9w0BAQEFAASCAmAwggJcAgEAAoGBAJICxtNJUF+xtZ+SLWKinYsYIj7vRRZpehaHNxWhrOD+NuVLHfe/FALiR0+ondG6An6h39ursz3SXtab8UYfQuac6f9rC6ycMU5AJEbZLrRuyqaWYm2G9s9e1Foy5/wwvHMRte/Lv4CMbja0iqgSY4fMl7Gt8FLY0I8AJaSVM71vAgMBAAECgYB5tN7Ol7nrSlI+ZLZ4FVyE6OUC2KcZ+2nNBYChA1b7ZGuVzXt5W0ju7nbKq56Bhy81JvFWRlTuH0D2Wp5O+RflqCTAVTayWPqcwVLgBQNiuJ4bTaTaoVrpaeyEWhQhjxJLIHrasI/bnpPOMvSLnWDHCh8jXNcsZfuxVjpj3kw6gQJBAMmqqTr3eDrhgLXNdX36ASPRK0N3+Oh/Ta5rmA+AdGY7yqOJnXN6zANa1pzX/iag0ASuNWezx33uF5lQdky55zECQQC5WW1sH6Qe0Z9Vl7AVoJj+YPROGP99d+y82MlOMmitmTjnUAQWWWFL4EXfyZ1CUrIuawZjKrZLWDm4xKzm8gafAkARpCk7rExLMlDVFo0RoR4aaQDU3RjcFc7Q1D6wFHeaPd7DIZWxdWuFW5vsioSEEos/7ZFkafiojnxn//7pRVXxAkAmcjBKTz3hzqV4QaCau9dAXKgQUwsb4XZPrcAD4lzoNXIiOOzAHgYakQitZMqj6TdgfX6zrzZk5oYCl3kt5mINAkEAnuk9H2/mLGIIdsZb09FLnHlPljTOCKCM6es72XbELd9hiD/nzu58ho91CJnVK1BD8AlyS9jUqmgTxaSQ8SXqhg==";

/// Source of the RSA keypair used to wrap and unwrap symmetric keys.
#[cfg_attr(test, mockall::automock)]
pub trait KeyProvider: Send + Sync {
    /// Public half, used to wrap keys for the holder of [`KeyProvider::private_key`].
    fn public_key(&self) -> &RsaPublicKey;

    /// Private half, used to unwrap keys.
    fn private_key(&self) -> &RsaPrivateKey;
}

/// A keypair decoded once from Base64 DER and held for the process lifetime.
#[derive(Clone)]
pub struct StaticKeyPair {
    public: RsaPublicKey,
    private: RsaPrivateKey,
}

impl StaticKeyPair {
    /// Decode and pair-check a Base64 SPKI public key and PKCS#8 private key.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyFormatError`] if either half cannot be decoded, or
    /// [`KeyFormatError::MismatchedKeyPair`] if they do not belong together.
    pub fn from_base64_der(public_b64: &str, private_b64: &str) -> Result<Self, KeyFormatError> {
        let public = decode_public_key(public_b64)?;
        let private = decode_private_key(private_b64)?;
        if private.to_public_key() != public {
            return Err(KeyFormatError::MismatchedKeyPair);
        }
        Ok(Self { public, private })
    }
}

impl KeyProvider for StaticKeyPair {
    fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }
}

impl fmt::Debug for StaticKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticKeyPair")
            .field("public", &self.public)
            .field("private", &"[REDACTED]")
            .finish()
    }
}

/// The built-in demonstration keypair.
///
/// Decoded on first use; later calls share the same parsed keys.
///
/// # Errors
///
/// Returns the decoding error if the embedded constants are unusable.
pub fn demo_key_pair() -> Result<Arc<StaticKeyPair>, KeyFormatError> {
    static DEMO: OnceLock<Result<Arc<StaticKeyPair>, KeyFormatError>> = OnceLock::new();
    DEMO.get_or_init(|| {
        debug!("decoding built-in demonstration RSA keypair");
        StaticKeyPair::from_base64_der(DEMO_RSA_PUBLIC_1024, DEMO_RSA_PRIVATE_1024).map(Arc::new)
    })
    .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_pair_decodes() {
        let pair = demo_key_pair().unwrap();
        assert_eq!(pair.private_key().to_public_key(), *pair.public_key());
    }

    #[test]
    fn demo_pair_is_decoded_once() {
        let a = demo_key_pair().unwrap();
        let b = demo_key_pair().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn mismatched_halves_rejected() {
        use aes_gcm::aead::OsRng;
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};

        let other = RsaPrivateKey::new(&mut OsRng, 1024).unwrap();
        let other_public_der = other.to_public_key().to_public_key_der().unwrap();
        let other_private_der = other.to_pkcs8_der().unwrap();

        let err = StaticKeyPair::from_base64_der(
            &STANDARD.encode(other_public_der.as_bytes()),
            DEMO_RSA_PRIVATE_1024,
        )
        .unwrap_err();
        assert_eq!(err, KeyFormatError::MismatchedKeyPair);

        let pair = StaticKeyPair::from_base64_der(
            &STANDARD.encode(other_public_der.as_bytes()),
            &STANDARD.encode(other_private_der.as_bytes()),
        );
        assert!(pair.is_ok());
    }

    #[test]
    fn malformed_halves_rejected() {
        assert_eq!(
            StaticKeyPair::from_base64_der("%%%", DEMO_RSA_PRIVATE_1024).unwrap_err(),
            KeyFormatError::InvalidBase64
        );
        assert_eq!(
            StaticKeyPair::from_base64_der(DEMO_RSA_PUBLIC_1024, DEMO_RSA_PUBLIC_1024).unwrap_err(),
            KeyFormatError::InvalidPrivateKey
        );
    }

    #[test]
    fn private_key_redacted_in_debug() {
        let pair = demo_key_pair().unwrap();
        let dbg = format!("{pair:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("RsaPrivateKey"));
    }
}
