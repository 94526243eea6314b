use std::sync::Arc;
use std::thread;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use hybrid_crypto::hybrid::{decrypt, encrypt, generate_symmetric_key, unwrap_key, wrap_key};
use hybrid_crypto::keys::{demo_key_pair, DEMO_RSA_PRIVATE_1024, DEMO_RSA_PUBLIC_1024};
use hybrid_crypto::{CryptoError, HybridError, HybridService, NonceMode};

#[test]
fn test_round_trip_across_plaintexts() {
    let plaintexts = [
        String::new(),
        "hello world".to_string(),
        "ünïcödé ✓".to_string(),
        "x".repeat(64 * 1024),
    ];
    for plaintext in &plaintexts {
        let key = generate_symmetric_key();
        let cipher_text = encrypt(plaintext, &key).expect("encryption should succeed");
        assert_ne!(&cipher_text, plaintext);
        let recovered = decrypt(&cipher_text, &key).expect("decryption should succeed");
        assert_eq!(&recovered, plaintext);
    }
}

#[test]
fn test_full_hybrid_flow_with_reference_keypair() {
    let key = generate_symmetric_key();
    let cipher_text = encrypt("hello world", &key).expect("encryption should succeed");
    let cipher_key = wrap_key(&key, DEMO_RSA_PUBLIC_1024).expect("wrap should succeed");

    let recovered_key = unwrap_key(&cipher_key, DEMO_RSA_PRIVATE_1024).expect("unwrap should succeed");
    assert_eq!(recovered_key, key);
    let plaintext = decrypt(&cipher_text, &recovered_key).expect("decryption should succeed");
    assert_eq!(plaintext, "hello world");
}

#[test]
fn test_every_flipped_byte_is_detected() {
    let key = generate_symmetric_key();
    let cipher_text = encrypt("tamper detection", &key).expect("encryption should succeed");
    let raw = STANDARD.decode(&cipher_text).expect("ciphertext is base64");

    for i in 0..raw.len() {
        let mut tampered = raw.clone();
        tampered[i] ^= 0x80;
        let result = decrypt(&STANDARD.encode(&tampered), &key);
        assert_eq!(
            result,
            Err(HybridError::Crypto(CryptoError::AeadFailure)),
            "flip at byte {i} was not detected"
        );
    }
}

#[test]
fn test_wrong_key_is_rejected() {
    let cipher_text = encrypt("secret", &generate_symmetric_key()).expect("encryption should succeed");
    let result = decrypt(&cipher_text, &generate_symmetric_key());
    assert_eq!(result, Err(HybridError::Crypto(CryptoError::AeadFailure)));
}

#[test]
fn test_oversized_key_wrap_fails_deterministically() {
    let oversized = STANDARD.encode([0xA5u8; 200]);
    for _ in 0..3 {
        let result = wrap_key(&oversized, DEMO_RSA_PUBLIC_1024);
        assert_eq!(
            result,
            Err(HybridError::Crypto(CryptoError::PayloadTooLarge { len: 200, max: 117 }))
        );
    }
}

#[test]
fn test_legacy_ciphertext_layout() {
    let service = HybridService::new(NonceMode::LegacyZero, demo_key_pair().expect("demo keypair"));
    let key = generate_symmetric_key();
    let sealed = service.seal("hello world", &key).expect("seal should succeed");

    // ciphertext || 16-byte tag, no transmitted nonce
    let raw = STANDARD.decode(&sealed.cipher_text).expect("ciphertext is base64");
    assert_eq!(raw.len(), "hello world".len() + 16);

    let again = service.seal("hello world", &key).expect("seal should succeed");
    assert_eq!(again.cipher_text, sealed.cipher_text);
}

#[test]
fn test_service_is_shareable_across_threads() {
    let service = Arc::new(HybridService::new(
        NonceMode::Random,
        demo_key_pair().expect("demo keypair"),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let text = format!("message {i}");
                let key = generate_symmetric_key();
                let sealed = service.seal(&text, &key).expect("seal should succeed");
                let opened = service
                    .open(&sealed.cipher_text, &sealed.cipher_key)
                    .expect("open should succeed");
                assert_eq!(opened.plain_text, text);
                assert_eq!(opened.plain_key, key);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread should not panic");
    }
}
