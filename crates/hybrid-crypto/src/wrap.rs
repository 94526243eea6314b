//! RSA key wrapping: PKCS#1 v1.5 encryption of raw symmetric key bytes.
//!
//! Keys arrive as Base64 DER: X.509 SubjectPublicKeyInfo for the public half,
//! PKCS#8 for the private half. Wrapped keys and the key bytes they protect are
//! exchanged as standard Base64.

use aes_gcm::aead::OsRng;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::{
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    traits::PublicKeyParts,
    Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey,
};
use zeroize::Zeroizing;

use crate::error::{CryptoError, KeyFormatError};

/// Bytes of padding PKCS#1 v1.5 encryption reserves in every block.
pub const PKCS1_V15_OVERHEAD: usize = 11;

/// Parse a Base64 X.509 SubjectPublicKeyInfo DER blob into an RSA public key.
///
/// # Errors
///
/// Returns [`KeyFormatError::InvalidBase64`] or
/// [`KeyFormatError::InvalidPublicKey`].
pub fn decode_public_key(der_b64: &str) -> Result<RsaPublicKey, KeyFormatError> {
    let der = STANDARD
        .decode(der_b64.trim())
        .map_err(|_| KeyFormatError::InvalidBase64)?;
    RsaPublicKey::from_public_key_der(&der).map_err(|_| KeyFormatError::InvalidPublicKey)
}

/// Parse a Base64 PKCS#8 DER blob into an RSA private key.
///
/// # Errors
///
/// Returns [`KeyFormatError::InvalidBase64`] or
/// [`KeyFormatError::InvalidPrivateKey`].
pub fn decode_private_key(der_b64: &str) -> Result<RsaPrivateKey, KeyFormatError> {
    let der = Zeroizing::new(
        STANDARD
            .decode(der_b64.trim())
            .map_err(|_| KeyFormatError::InvalidBase64)?,
    );
    RsaPrivateKey::from_pkcs8_der(&der).map_err(|_| KeyFormatError::InvalidPrivateKey)
}

/// Largest payload a single PKCS#1 v1.5 block can carry under `public_key`.
///
/// 117 bytes for a 1024-bit modulus.
pub fn max_payload_len(public_key: &RsaPublicKey) -> usize {
    public_key.size().saturating_sub(PKCS1_V15_OVERHEAD)
}

/// Wrap Base64 key bytes under `public_key` and return the Base64 wrapped key.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidBase64`] for malformed input,
/// [`CryptoError::PayloadTooLarge`] if the decoded bytes exceed
/// [`max_payload_len`], and [`CryptoError::RsaFailure`] if encryption fails.
pub fn wrap(key_bytes_b64: &str, public_key: &RsaPublicKey) -> Result<String, CryptoError> {
    let key_bytes = Zeroizing::new(
        STANDARD
            .decode(key_bytes_b64.trim())
            .map_err(|_| CryptoError::InvalidBase64)?,
    );
    wrap_bytes(&key_bytes, public_key).map(|w| STANDARD.encode(w))
}

/// Unwrap a Base64 wrapped key with `private_key` and return the key bytes as Base64.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidBase64`] for malformed input and
/// [`CryptoError::RsaFailure`] on any decryption or padding failure.
pub fn unwrap(wrapped_key_b64: &str, private_key: &RsaPrivateKey) -> Result<String, CryptoError> {
    let wrapped = STANDARD
        .decode(wrapped_key_b64.trim())
        .map_err(|_| CryptoError::InvalidBase64)?;
    let key_bytes = unwrap_bytes(&wrapped, private_key)?;
    Ok(STANDARD.encode(&*key_bytes))
}

/// Wrap raw key bytes under `public_key`.
///
/// # Errors
///
/// See [`wrap`].
pub fn wrap_bytes(key_bytes: &[u8], public_key: &RsaPublicKey) -> Result<Vec<u8>, CryptoError> {
    let max = max_payload_len(public_key);
    if key_bytes.len() > max {
        return Err(CryptoError::PayloadTooLarge {
            len: key_bytes.len(),
            max,
        });
    }
    public_key
        .encrypt(&mut OsRng, Pkcs1v15Encrypt, key_bytes)
        .map_err(|_| CryptoError::RsaFailure)
}

/// Unwrap a raw wrapped key with `private_key`.
///
/// The recovered bytes are wiped when the returned buffer is dropped.
///
/// # Errors
///
/// See [`unwrap`].
pub fn unwrap_bytes(
    wrapped: &[u8],
    private_key: &RsaPrivateKey,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    private_key
        .decrypt(Pkcs1v15Encrypt, wrapped)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::RsaFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{DEMO_RSA_PRIVATE_1024, DEMO_RSA_PUBLIC_1024};

    fn demo_pair() -> (RsaPublicKey, RsaPrivateKey) {
        (
            decode_public_key(DEMO_RSA_PUBLIC_1024).unwrap(),
            decode_private_key(DEMO_RSA_PRIVATE_1024).unwrap(),
        )
    }

    #[test]
    fn demo_key_is_1024_bit() {
        let (public, _) = demo_pair();
        assert_eq!(public.size(), 128);
        assert_eq!(max_payload_len(&public), 117);
    }

    #[test]
    fn wrap_unwrap_round_trip() {
        let (public, private) = demo_pair();
        let key_b64 = STANDARD.encode([0x5Au8; 32]);
        let wrapped = wrap(&key_b64, &public).unwrap();
        assert_eq!(STANDARD.decode(&wrapped).unwrap().len(), 128);
        assert_eq!(unwrap(&wrapped, &private).unwrap(), key_b64);
    }

    #[test]
    fn wrapping_is_randomised() {
        let (public, _) = demo_pair();
        let key_b64 = STANDARD.encode([1u8; 32]);
        assert_ne!(wrap(&key_b64, &public).unwrap(), wrap(&key_b64, &public).unwrap());
    }

    #[test]
    fn payload_at_limit_is_accepted() {
        let (public, private) = demo_pair();
        let payload = vec![7u8; 117];
        let wrapped = wrap_bytes(&payload, &public).unwrap();
        let recovered: Zeroizing<Vec<u8>> = unwrap_bytes(&wrapped, &private).unwrap();
        assert_eq!(*recovered, payload);
    }

    #[test]
    fn oversized_payload_rejected() {
        let (public, _) = demo_pair();
        let oversized = STANDARD.encode([0u8; 200]);
        assert_eq!(
            wrap(&oversized, &public),
            Err(CryptoError::PayloadTooLarge { len: 200, max: 117 })
        );
        assert_eq!(
            wrap_bytes(&[0u8; 118], &public),
            Err(CryptoError::PayloadTooLarge { len: 118, max: 117 })
        );
    }

    #[test]
    fn tampered_wrapped_key_rejected() {
        let (public, private) = demo_pair();
        let mut wrapped = wrap_bytes(&[9u8; 32], &public).unwrap();
        wrapped[0] ^= 0xFF;
        assert_eq!(unwrap_bytes(&wrapped, &private), Err(CryptoError::RsaFailure));
    }

    #[test]
    fn malformed_inputs_rejected() {
        let (public, private) = demo_pair();
        assert_eq!(wrap("***", &public), Err(CryptoError::InvalidBase64));
        assert_eq!(unwrap("***", &private), Err(CryptoError::InvalidBase64));
        assert_eq!(
            unwrap(&STANDARD.encode([1u8; 12]), &private),
            Err(CryptoError::RsaFailure)
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(
            decode_public_key("not base64!").unwrap_err(),
            KeyFormatError::InvalidBase64
        );
        assert_eq!(
            decode_public_key(&STANDARD.encode(b"not der")).unwrap_err(),
            KeyFormatError::InvalidPublicKey
        );
        assert_eq!(
            decode_private_key(&STANDARD.encode(b"not der")).unwrap_err(),
            KeyFormatError::InvalidPrivateKey
        );
    }

    #[test]
    fn decode_rejects_swapped_halves() {
        assert_eq!(
            decode_public_key(DEMO_RSA_PRIVATE_1024).unwrap_err(),
            KeyFormatError::InvalidPublicKey
        );
        assert_eq!(
            decode_private_key(DEMO_RSA_PUBLIC_1024).unwrap_err(),
            KeyFormatError::InvalidPrivateKey
        );
    }

    #[test]
    fn repeated_decoding_behaves_identically() {
        let public_a = decode_public_key(DEMO_RSA_PUBLIC_1024).unwrap();
        let public_b = decode_public_key(DEMO_RSA_PUBLIC_1024).unwrap();
        let private_a = decode_private_key(DEMO_RSA_PRIVATE_1024).unwrap();
        let private_b = decode_private_key(DEMO_RSA_PRIVATE_1024).unwrap();
        assert_eq!(public_a, public_b);

        let key_b64 = STANDARD.encode([3u8; 32]);
        let via_a = wrap(&key_b64, &public_a).unwrap();
        let via_b = wrap(&key_b64, &public_b).unwrap();
        assert_eq!(unwrap(&via_a, &private_b).unwrap(), key_b64);
        assert_eq!(unwrap(&via_b, &private_a).unwrap(), key_b64);
    }
}
