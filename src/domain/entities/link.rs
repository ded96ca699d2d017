//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use crate::domain::short_code::ShortCode;

/// A shortened URL with visit statistics.
///
/// `code` and `target_url` are fixed at creation. Only the redirect path
/// touches `total_clicks` and `last_clicked_at`, and it always moves both
/// together, so `last_clicked_at` is set exactly when `total_clicks > 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        target_url: String,
        created_at: DateTime<Utc>,
        total_clicks: i64,
        last_clicked_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            target_url,
            created_at,
            total_clicks,
            last_clicked_at,
        }
    }

    /// Returns true if the link has been resolved at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked_at.is_some()
    }
}

/// Input data for inserting a new link.
///
/// The code is already validated; the store only has to enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: ShortCode,
    pub target_url: String,
}

impl NewLink {
    pub fn new(code: ShortCode, target_url: impl Into<String>) -> Self {
        Self {
            code,
            target_url: target_url.into(),
        }
    }
}
