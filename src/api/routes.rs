//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler,
    list_links_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Health and link management routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /healthz`      - Service and link store health
/// - `GET    /links`        - List all links, newest first
/// - `POST   /links`        - Create a link (random or custom code)
/// - `GET    /links/{code}` - Show one link with click statistics
/// - `DELETE /links/{code}` - Delete a link (idempotent)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
