//! Structured logging, with optional OpenTelemetry span export.
//!
//! JSON logs always go to stdout. When `OTEL_EXPORTER_OTLP_ENDPOINT` is set,
//! spans are additionally exported over OTLP/gRPC.
//!
//! # Telemetry invariants
//!
//! - **No plaintext or key material** may appear in any span attribute or log field.
//!   This covers symmetric keys and wrapped keys in either direction.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG` wins when set.

pub mod init;

pub use init::init_telemetry;
