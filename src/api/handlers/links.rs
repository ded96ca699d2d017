//! Handlers for link management endpoints (create, list, show, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, DeleteResponse, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "targetUrl": "https://example.com/some/long/path",
///   "customCode": "promo24"   // optional, 6-8 characters [A-Za-z0-9]
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the stored link:
///
/// ```json
/// {
///   "code": "promo24",
///   "targetUrl": "https://example.com/some/long/path",
///   "shortUrl": "http://localhost:3000/promo24",
///   "createdAt": "2025-01-01T12:00:00Z",
///   "totalClicks": 0,
///   "lastClickedAt": null
/// }
/// ```
///
/// # Errors
///
/// - 400 if the URL or the custom code is invalid
/// - 409 if the custom code is taken
/// - 503 if no free code could be generated or the store is down
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .allocator
        .allocate(payload.requested_code(), &payload.target_url)
        .await?;

    metrics::counter!("tinylink_links_created_total").increment(1);
    tracing::info!(code = %link.code, "Link created");

    let short_url = state.short_url(&link.code);
    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, short_url)),
    ))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.short_url(&link.code);
            LinkResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(items))
}

/// Returns one link with its click statistics. Does not count a click.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    let short_url = state.short_url(&link.code);

    Ok(Json(LinkResponse::from_link(link, short_url)))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// Always answers `{"ok": true}` when the store is reachable, whether or not
/// the code existed.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete_link(&code).await?;
    tracing::info!(%code, "Link deleted");

    Ok(Json(DeleteResponse { ok: true }))
}
