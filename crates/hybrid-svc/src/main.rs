//! `hybrid-enc-svc`: service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP spans).
//! 3. Decode the RSA keypair once; it stays immutable for the process lifetime.
//! 4. Build the Axum router and start the HTTP server.

mod config;
mod server;
mod telemetry;

use anyhow::Result;
use hybrid_crypto::NonceMode;
use tracing::{info, warn};

use crate::config::Config;
use crate::server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        nonce_mode = %cfg.nonce_mode,
        "hybrid-enc-svc starting"
    );
    if cfg.nonce_mode == NonceMode::LegacyZero {
        warn!("legacy_zero nonce mode reuses the all-zero GCM nonce; each key must encrypt only one message");
    }

    // -----------------------------------------------------------------------
    // 3. RSA keypair
    // -----------------------------------------------------------------------
    let keys = cfg.load_key_pair()?;

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(cfg.nonce_mode, keys);
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
