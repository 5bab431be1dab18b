//! Route handlers.

use axum::extract::State;
use axum::Json;
use serde_json::value::RawValue;
use std::sync::Arc;

use crate::error::ApiError;
use crate::graph::{GraphClient, USER_SELECT};
use crate::identity::TokenSource;

/// Body of `GET /`.
pub const INDEX_MESSAGE: &str = "Test Graph API token retrieved from Managed Identity";

/// Shared, read-only state. Nothing here changes between requests.
pub struct AppState {
    /// Graph-audience tokens, acquired fresh on every call.
    pub tokens: Arc<dyn TokenSource>,
    pub graph: GraphClient,
}

/// GET /
pub async fn index() -> &'static str {
    INDEX_MESSAGE
}

/// GET /token
pub async fn token(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    let token = state.tokens.access_token().await?;
    Ok(token.as_str().to_owned())
}

/// GET /users
pub async fn users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Box<RawValue>>>, ApiError> {
    let users = state.graph.list_users(&USER_SELECT).await?;
    Ok(Json(users))
}
