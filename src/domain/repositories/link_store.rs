//! Store trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Durable mapping from short code to [`Link`].
///
/// Every method is a single statement against the backing store. The two
/// mutating calls must be atomic with respect to concurrent callers:
///
/// - [`insert_if_absent`](Self::insert_if_absent): at most one of several
///   racing inserts for the same code succeeds.
/// - [`increment_and_fetch`](Self::increment_and_fetch): concurrent calls for
///   one code never lose an increment.
///
/// No multi-row atomicity is required.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryLinkStore`] - process-local, for tests and local runs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Inserts a new link unless its code is already present.
    ///
    /// The returned link carries the store-assigned `id` and `created_at`,
    /// zero clicks and no last click.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CodeTaken`] if the code exists.
    /// Returns [`StoreError::Unavailable`] on infrastructure failures.
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Increments the click counter, stamps the last click time and returns
    /// the target URL, all in one operation.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the code exists
    /// - `Ok(None)` if it does not (nothing is modified)
    async fn increment_and_fetch(&self, code: &str) -> Result<Option<String>, StoreError>;

    /// Finds a link by its code.
    async fn get_by_code(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// Lists every link, newest first.
    async fn list_all(&self) -> Result<Vec<Link>, StoreError>;

    /// Deletes a link. Deleting a missing code is not an error.
    async fn delete_by_code(&self, code: &str) -> Result<(), StoreError>;

    /// Cheap round-trip used by health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
