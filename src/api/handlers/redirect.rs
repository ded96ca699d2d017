//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::domain::errors::LinkError;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::to_location;

/// Redirects a short code to its target URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// The counter increment happens in the same store call that looks up the
/// target, before the response is produced. Every request is counted,
/// including browser or client retries.
///
/// Non-ASCII targets are sent in their encoded ASCII form.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 503 Service Unavailable if the store cannot be reached.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.resolver.resolve(&code).await {
        Ok(target_url) => {
            metrics::counter!("tinylink_redirects_total", "outcome" => "hit").increment(1);
            debug!(%code, %target_url, "Redirecting");

            let location = to_location(&target_url).into_owned();
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        Err(err) => {
            let outcome = match &err {
                LinkError::CodeNotFound(_) => "miss",
                _ => "error",
            };
            metrics::counter!("tinylink_redirects_total", "outcome" => outcome).increment(1);

            Err(err.into())
        }
    }
}
