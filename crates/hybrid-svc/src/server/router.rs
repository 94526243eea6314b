//! Axum router construction.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/hybrid/encrypt", post(handlers::encrypt))
        .route("/hybrid/decrypt", post(handlers::decrypt))
        .route("/hybrid/key", get(handlers::generate_key))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(middleware::MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build(AppState::default());
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn health_route_exists() {
        let app = build(AppState::default());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn key_route_rejects_post() {
        let app = build(AppState::default());
        let req = Request::builder()
            .method("POST")
            .uri("/hybrid/key")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[tokio::test]
    async fn encrypt_rejects_missing_fields() {
        let app = build(AppState::default());
        let req = Request::builder()
            .method("POST")
            .uri("/hybrid/encrypt")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"plain_text":"only text"}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 422);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let app = build(AppState::default());
        let text = "x".repeat(middleware::MAX_BODY_BYTES + 1);
        let body = format!(r#"{{"plain_text":"{text}","plain_key":"AA=="}}"#);
        let req = Request::builder()
            .method("POST")
            .uri("/hybrid/encrypt")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 413);
    }
}
