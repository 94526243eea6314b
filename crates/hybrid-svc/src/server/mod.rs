//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Translate crypto-layer errors into caller-safe HTTP responses.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
