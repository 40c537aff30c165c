/// HTTP API surface
pub mod admin;

use crate::context::AppContext;
use axum::Router;

/// Build all API routes
pub fn routes() -> Router<AppContext> {
    Router::new().nest("/api/v1/admin", admin::routes())
}
