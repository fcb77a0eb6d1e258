//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: infrastructure wiring (record store, balance service)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::{get, post}, Extension, Router};
use tower::ServiceBuilder;

use splitledger_infra::BalanceConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: BalanceConfig) -> Router {
    build_app_with_services(Arc::new(services::build_services(config)))
}

/// Build the router around pre-wired services (tests seed the store directly).
pub fn build_app_with_services(services: Arc<services::AppServices>) -> Router {
    // Protected routes: require a caller identity.
    let protected = routes::router()
        .layer(axum::middleware::from_fn(middleware::identity_middleware));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/groups", post(routes::groups::create_group))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
