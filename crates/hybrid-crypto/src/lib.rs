//! Hybrid encryption core: AES-256-GCM for payloads, RSA PKCS#1 v1.5 for the
//! symmetric keys that protect them.
//!
//! This crate is intentionally free of HTTP, async runtime, and configuration
//! dependencies. It provides the transforms the `hybrid-svc` binary exposes.
//!
//! # Data flow
//!
//! ```text
//! encrypt: plaintext + key  --AES-GCM-->  cipher_text
//!          key + public key --RSA------>  cipher_key
//! decrypt: cipher_key + private key --RSA------> key
//!          cipher_text + key        --AES-GCM--> plaintext
//! ```

pub mod cipher;
pub mod error;
pub mod hybrid;
pub mod keys;
pub mod wrap;

pub use cipher::{NonceMode, SymmetricCipher, SymmetricKey, KEY_LEN};
pub use error::{CryptoError, HybridError, KeyFormatError};
pub use hybrid::HybridService;
pub use keys::{KeyProvider, StaticKeyPair};
