//! Configuration loading and validation for the hybrid encryption service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any variable is invalid.

use std::sync::Arc;

use anyhow::{Context, Result};
use hybrid_crypto::keys::{demo_key_pair, StaticKeyPair};
use hybrid_crypto::NonceMode;
use serde::Deserialize;
use tracing::warn;

/// Validated service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Base64 X.509 SubjectPublicKeyInfo DER of the RSA wrapping key.
    /// Must be set together with `rsa_private_key`.
    #[serde(default)]
    pub rsa_public_key: Option<String>,

    /// Base64 PKCS#8 DER of the RSA unwrapping key.
    /// Must be set together with `rsa_public_key`.
    #[serde(default)]
    pub rsa_private_key: Option<String>,

    /// Nonce handling for AES-GCM (`random` or `legacy_zero`).
    #[serde(default)]
    pub nonce_mode: NonceMode,

    /// OTLP endpoint for span export. Logs only when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = ::config::Config::builder()
            .add_source(::config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.listen_port == 0 {
            anyhow::bail!("LISTEN_PORT must be > 0");
        }
        match (&self.rsa_public_key, &self.rsa_private_key) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("RSA_PUBLIC_KEY and RSA_PRIVATE_KEY must be set together")
            }
            (Some(public), Some(private)) => {
                ensure_non_empty(public, "RSA_PUBLIC_KEY")?;
                ensure_non_empty(private, "RSA_PRIVATE_KEY")?;
            }
            (None, None) => {}
        }
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            ensure_non_empty(endpoint, "OTEL_EXPORTER_OTLP_ENDPOINT")?;
        }
        Ok(())
    }

    /// Decode the configured RSA keypair, falling back to the demonstration pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured key material is malformed or the two
    /// halves do not belong together.
    pub fn load_key_pair(&self) -> Result<Arc<StaticKeyPair>> {
        match (&self.rsa_public_key, &self.rsa_private_key) {
            (Some(public), Some(private)) => StaticKeyPair::from_base64_der(public, private)
                .map(Arc::new)
                .context("failed to decode configured RSA keypair"),
            _ => {
                warn!("no RSA keypair configured; using the public demonstration keypair");
                demo_key_pair().context("failed to decode demonstration RSA keypair")
            }
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("listen_port", &self.listen_port)
            .field("rsa_public_key", &self.rsa_public_key)
            .field(
                "rsa_private_key",
                &self.rsa_private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("nonce_mode", &self.nonce_mode)
            .field("otel_exporter_otlp_endpoint", &self.otel_exporter_otlp_endpoint)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} must not be empty when set");
    }
    Ok(())
}
