//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (store reachable)
//!
//! # Cashier API (JSON)
//! GET    /cashiers             - List cashiers
//! POST   /cashiers             - Register a cashier
//! DELETE /cashiers/{id}        - Remove a cashier
//!
//! # Cashier screens (HTML)
//! GET    /cashier              - Cashier list
//! GET    /cashier/new          - Add-cashier form
//! POST   /cashier/new          - Submit the form
//! POST   /cashier/{id}/delete  - Remove a cashier, redirect to the list
//! ```

use axum::{Router, routing::get};

use crate::state::AppState;

pub mod cashier_pages;
pub mod cashiers;
pub mod health;

/// Build the complete router for the admin server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(cashiers::router())
        .merge(cashier_pages::router())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = routes().with_state(AppState::for_tests());

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");

        let response = app
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = routes().with_state(AppState::for_tests());
        let response = app
            .oneshot(Request::get("/cashiers/1/extra").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
