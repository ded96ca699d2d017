//! DTOs for the link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
///
/// `targetUrl` is also accepted as `originalUrl` or `url`, and `customCode`
/// as `code`. Format checks on both values happen in the allocator; this
/// struct only caps the target at 32 KiB so one request cannot store an
/// arbitrarily large row.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Absolute HTTP(S) URL to redirect to.
    #[serde(default, alias = "originalUrl", alias = "url")]
    #[validate(length(max = 32768, message = "targetUrl must be at most 32768 characters"))]
    pub target_url: String,

    /// Optional requested short code. An empty string means "generate one".
    #[serde(default, alias = "code")]
    pub custom_code: Option<String>,
}

impl CreateLinkRequest {
    /// The requested code, treating an empty value as absent.
    pub fn requested_code(&self) -> Option<&str> {
        self.custom_code.as_deref().filter(|code| !code.is_empty())
    }
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub target_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            target_url: link.target_url,
            short_url,
            created_at: link.created_at,
            total_clicks: link.total_clicks,
            last_clicked_at: link.last_clicked_at,
        }
    }
}

/// Body returned by the delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}
