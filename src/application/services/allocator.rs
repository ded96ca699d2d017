//! Short code allocation for new links.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{LinkError, StoreError};
use crate::domain::repositories::LinkStore;
use crate::domain::short_code::ShortCode;
use crate::utils::url_validator::validate_target_url;

/// Default bound on random code insert attempts.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Produces a unique code for a new link and persists it.
///
/// Uniqueness is ultimately enforced by [`LinkStore::insert_if_absent`]. The
/// existence check done for requested codes only exists to fail fast; a
/// concurrent allocator can still win the race between check and insert, in
/// which case the insert reports the conflict.
pub struct CodeAllocator<S: LinkStore + ?Sized> {
    store: Arc<S>,
    max_attempts: usize,
}

impl<S: LinkStore + ?Sized> CodeAllocator<S> {
    /// Creates an allocator with the default attempt bound.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_max_attempts(store, DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates an allocator that gives up after `max_attempts` colliding
    /// random codes. Values below 1 are treated as 1.
    pub fn with_max_attempts(store: Arc<S>, max_attempts: usize) -> Self {
        Self {
            store,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Allocates a code for `target_url` and inserts the link.
    ///
    /// # Arguments
    ///
    /// - `requested_code` - Caller's preferred code, used as-is if valid and free
    /// - `target_url` - Absolute `http`/`https` URL to redirect to
    ///
    /// # Code Generation
    ///
    /// Without a requested code, draws random 6-character codes and retries on
    /// collision up to [`Self::max_attempts`] times.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidTarget`] - `target_url` is not an absolute HTTP(S) URL
    /// - [`LinkError::InvalidCode`] - `requested_code` breaks the format rules
    /// - [`LinkError::CodeConflict`] - `requested_code` is already in use
    /// - [`LinkError::AllocationExhausted`] - every random candidate collided
    /// - [`LinkError::StoreUnavailable`] - the store call failed
    ///
    /// On any error no link is created.
    pub async fn allocate(
        &self,
        requested_code: Option<&str>,
        target_url: &str,
    ) -> Result<Link, LinkError> {
        let target_url = validate_target_url(target_url)
            .map_err(|e| LinkError::InvalidTarget(e.to_string()))?;

        match requested_code {
            Some(code) => self.allocate_requested(code, target_url).await,
            None => self.allocate_generated(target_url).await,
        }
    }

    async fn allocate_requested(&self, code: &str, target_url: &str) -> Result<Link, LinkError> {
        let code = ShortCode::parse(code)?;

        if self.store.get_by_code(code.as_str()).await?.is_some() {
            return Err(LinkError::CodeConflict(code.into_inner()));
        }

        // A lost race surfaces here as CodeTaken, which converts to CodeConflict.
        let link = self
            .store
            .insert_if_absent(NewLink::new(code, target_url))
            .await?;

        Ok(link)
    }

    async fn allocate_generated(&self, target_url: &str) -> Result<Link, LinkError> {
        for _ in 0..self.max_attempts {
            let candidate = ShortCode::generate(&mut rand::rng());

            match self
                .store
                .insert_if_absent(NewLink::new(candidate, target_url))
                .await
            {
                Ok(link) => return Ok(link),
                Err(StoreError::CodeTaken(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(LinkError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkStore;
    use chrono::Utc;

    fn created(new_link: &NewLink) -> Link {
        Link::new(
            1,
            new_link.code.as_str().to_string(),
            new_link.target_url.clone(),
            Utc::now(),
            0,
            None,
        )
    }

    fn existing(code: &str) -> Link {
        Link::new(
            7,
            code.to_string(),
            "https://other.com".to_string(),
            Utc::now(),
            0,
            None,
        )
    }

    #[tokio::test]
    async fn test_allocate_generated_success() {
        let mut store = MockLinkStore::new();
        store.expect_get_by_code().times(0);
        store
            .expect_insert_if_absent()
            .withf(|new_link| {
                new_link.code.as_str().len() == 6 && new_link.target_url == "https://example.com/x"
            })
            .times(1)
            .returning(|new_link| Ok(created(&new_link)));

        let allocator = CodeAllocator::new(Arc::new(store));
        let link = allocator
            .allocate(None, "https://example.com/x")
            .await
            .unwrap();

        assert_eq!(link.code.len(), 6);
        assert!(ShortCode::parse(&link.code).is_ok());
        assert_eq!(link.target_url, "https://example.com/x");
        assert_eq!(link.total_clicks, 0);
        assert!(link.last_clicked_at.is_none());
    }

    #[tokio::test]
    async fn test_allocate_generated_retries_on_collision() {
        let mut store = MockLinkStore::new();
        let mut calls = 0;
        store
            .expect_insert_if_absent()
            .times(3)
            .returning(move |new_link| {
                calls += 1;
                if calls < 3 {
                    Err(StoreError::CodeTaken(new_link.code.into_inner()))
                } else {
                    Ok(created(&new_link))
                }
            });

        let allocator = CodeAllocator::new(Arc::new(store));
        let result = allocator.allocate(None, "https://example.com").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_allocate_generated_exhausted_after_ten_attempts() {
        let mut store = MockLinkStore::new();
        store
            .expect_insert_if_absent()
            .times(10)
            .returning(|new_link| Err(StoreError::CodeTaken(new_link.code.into_inner())));

        let allocator = CodeAllocator::new(Arc::new(store));
        let err = allocator
            .allocate(None, "https://example.com")
            .await
            .unwrap_err();

        assert_eq!(err, LinkError::AllocationExhausted { attempts: 10 });
    }

    #[tokio::test]
    async fn test_allocate_respects_custom_attempt_bound() {
        let mut store = MockLinkStore::new();
        store
            .expect_insert_if_absent()
            .times(3)
            .returning(|new_link| Err(StoreError::CodeTaken(new_link.code.into_inner())));

        let allocator = CodeAllocator::with_max_attempts(Arc::new(store), 3);
        let err = allocator
            .allocate(None, "https://example.com")
            .await
            .unwrap_err();

        assert_eq!(err, LinkError::AllocationExhausted { attempts: 3 });
    }

    #[tokio::test]
    async fn test_allocate_generated_store_failure_is_not_retried() {
        let mut store = MockLinkStore::new();
        store
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".into())));

        let allocator = CodeAllocator::new(Arc::new(store));
        let err = allocator
            .allocate(None, "https://example.com")
            .await
            .unwrap_err();

        assert_eq!(err, LinkError::StoreUnavailable("connection refused".into()));
    }

    #[tokio::test]
    async fn test_allocate_invalid_target_touches_nothing() {
        let mut store = MockLinkStore::new();
        store.expect_get_by_code().times(0);
        store.expect_insert_if_absent().times(0);

        let allocator = CodeAllocator::new(Arc::new(store));

        for url in ["not-a-url", "ftp://example.com", "/relative", ""] {
            let err = allocator.allocate(None, url).await.unwrap_err();
            assert!(matches!(err, LinkError::InvalidTarget(_)), "{url}");

            let err = allocator.allocate(Some("ABC123"), url).await.unwrap_err();
            assert!(matches!(err, LinkError::InvalidTarget(_)), "{url}");
        }
    }

    #[tokio::test]
    async fn test_allocate_requested_code_success() {
        let mut store = MockLinkStore::new();
        store
            .expect_get_by_code()
            .withf(|code| code == "ABC123")
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_insert_if_absent()
            .withf(|new_link| new_link.code.as_str() == "ABC123")
            .times(1)
            .returning(|new_link| Ok(created(&new_link)));

        let allocator = CodeAllocator::new(Arc::new(store));
        let link = allocator
            .allocate(Some("ABC123"), "https://a.com")
            .await
            .unwrap();

        assert_eq!(link.code, "ABC123");
        assert_eq!(link.target_url, "https://a.com");
    }

    #[tokio::test]
    async fn test_allocate_requested_code_invalid() {
        let mut store = MockLinkStore::new();
        store.expect_get_by_code().times(0);
        store.expect_insert_if_absent().times(0);

        let allocator = CodeAllocator::new(Arc::new(store));

        for code in ["abc12", "abcdef123", "abc-12", "abc 12", ""] {
            let err = allocator
                .allocate(Some(code), "https://example.com")
                .await
                .unwrap_err();
            assert_eq!(err, LinkError::InvalidCode(code.to_string()));
        }
    }

    #[tokio::test]
    async fn test_allocate_requested_code_already_exists() {
        let mut store = MockLinkStore::new();
        store
            .expect_get_by_code()
            .times(1)
            .returning(|code| Ok(Some(existing(code))));
        store.expect_insert_if_absent().times(0);

        let allocator = CodeAllocator::new(Arc::new(store));
        let err = allocator
            .allocate(Some("taken1"), "https://example.com")
            .await
            .unwrap_err();

        assert_eq!(err, LinkError::CodeConflict("taken1".into()));
    }

    #[tokio::test]
    async fn test_allocate_requested_code_lost_race() {
        let mut store = MockLinkStore::new();
        store.expect_get_by_code().times(1).returning(|_| Ok(None));
        store
            .expect_insert_if_absent()
            .times(1)
            .returning(|new_link| Err(StoreError::CodeTaken(new_link.code.into_inner())));

        let allocator = CodeAllocator::new(Arc::new(store));
        let err = allocator
            .allocate(Some("racy01"), "https://example.com")
            .await
            .unwrap_err();

        assert_eq!(err, LinkError::CodeConflict("racy01".into()));
    }

    #[tokio::test]
    async fn test_allocate_requested_code_store_down() {
        let mut store = MockLinkStore::new();
        store
            .expect_get_by_code()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("timeout".into())));
        store.expect_insert_if_absent().times(0);

        let allocator = CodeAllocator::new(Arc::new(store));
        let err = allocator
            .allocate(Some("ABC123"), "https://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, LinkError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_allocate_stores_trimmed_target() {
        let mut store = MockLinkStore::new();
        store
            .expect_insert_if_absent()
            .withf(|new_link| new_link.target_url == "https://example.com")
            .times(1)
            .returning(|new_link| Ok(created(&new_link)));

        let allocator = CodeAllocator::new(Arc::new(store));
        let link = allocator
            .allocate(None, "  https://example.com  ")
            .await
            .unwrap();

        assert_eq!(link.target_url, "https://example.com");
    }

    #[test]
    fn test_zero_attempts_clamped() {
        let allocator = CodeAllocator::with_max_attempts(Arc::new(MockLinkStore::new()), 0);
        assert_eq!(allocator.max_attempts(), 1);
    }
}
