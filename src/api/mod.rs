//! HTTP front door.
//!
//! - `GET /` - static confirmation string
//! - `GET /token` - raw Graph bearer token from the credential chain
//! - `GET /users` - first page of Graph users (`id`, `userPrincipalName`, `displayName`)

pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/token", get(handlers::token))
        .route("/users", get(handlers::users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
