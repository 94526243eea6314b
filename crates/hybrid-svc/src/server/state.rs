//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use hybrid_crypto::{HybridService, KeyProvider, NonceMode};

/// Application state shared across all request handlers.
///
/// Cloned per request; the service shares its keypair behind an `Arc`.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Hybrid encryption bound to the process-wide RSA keypair.
    pub hybrid: HybridService,
}

impl AppState {
    /// Create a new [`AppState`] over the given keypair and nonce mode.
    pub fn new(mode: NonceMode, keys: Arc<dyn KeyProvider>) -> Self {
        Self {
            hybrid: HybridService::new(mode, keys),
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// Creates an [`AppState`] over the demonstration keypair, suitable for tests.
    fn default() -> Self {
        let keys = hybrid_crypto::keys::demo_key_pair().unwrap();
        Self::new(NonceMode::default(), keys)
    }
}
