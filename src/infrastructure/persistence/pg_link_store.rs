//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkStore;

/// Name of the unique constraint PostgreSQL creates for `links.code`.
const CODE_UNIQUE_CONSTRAINT: &str = "links_code_key";

/// PostgreSQL store for link storage and click counting.
///
/// Every operation is one statement, so atomicity comes from PostgreSQL
/// itself: `INSERT ... ON CONFLICT DO NOTHING` for the conditional insert and
/// a single `UPDATE ... RETURNING` for the click increment.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    target_url: String,
    created_at: DateTime<Utc>,
    total_clicks: i64,
    last_clicked_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.code,
            row.target_url,
            row.created_at,
            row.total_clicks,
            row.last_clicked_at,
        )
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && db_err.constraint() == Some(CODE_UNIQUE_CONSTRAINT)
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let inserted = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, target_url)
            VALUES ($1, $2)
            ON CONFLICT (code) DO NOTHING
            RETURNING id, code, target_url, created_at, total_clicks, last_clicked_at
            "#,
        )
        .bind(new_link.code.as_str())
        .bind(&new_link.target_url)
        .fetch_optional(self.pool.as_ref())
        .await;

        match inserted {
            Ok(Some(row)) => Ok(row.into()),
            Ok(None) => Err(StoreError::CodeTaken(new_link.code.into_inner())),
            Err(e) if is_unique_violation_on_code(&e) => {
                Err(StoreError::CodeTaken(new_link.code.into_inner()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn increment_and_fetch(&self, code: &str) -> Result<Option<String>, StoreError> {
        let target_url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE links
            SET total_clicks = total_clicks + 1,
                last_clicked_at = NOW()
            WHERE code = $1
            RETURNING target_url
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(target_url)
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target_url, created_at, total_clicks, last_clicked_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_all(&self) -> Result<Vec<Link>, StoreError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target_url, created_at, total_clicks, last_clicked_at
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete_by_code(&self, code: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
