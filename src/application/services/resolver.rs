//! Short code resolution with click counting.

use std::sync::Arc;

use crate::domain::errors::LinkError;
use crate::domain::repositories::LinkStore;

/// Turns a short code into its target URL and records the visit.
///
/// Every successful call counts as one click. Client retries of the same
/// redirect are counted again; no deduplication is attempted.
pub struct RedirectResolver<S: LinkStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LinkStore + ?Sized> RedirectResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolves `code`, incrementing its click counter and last-click time
    /// in the same store operation.
    ///
    /// The code is not format-checked; anything that is not stored misses.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::CodeNotFound`] if no link has this code (nothing
    /// is modified). Returns [`LinkError::StoreUnavailable`] if the store
    /// call fails; the call is not retried.
    pub async fn resolve(&self, code: &str) -> Result<String, LinkError> {
        self.store
            .increment_and_fetch(code)
            .await?
            .ok_or_else(|| LinkError::CodeNotFound(code.to_string()))
    }
}
