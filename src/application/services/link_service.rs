//! Link lookup, listing and deletion.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::errors::LinkError;
use crate::domain::repositories::LinkStore;

/// Read and delete access to stored links.
///
/// These are straight passthroughs to the store. Creation goes through
/// [`super::CodeAllocator`] and click counting through
/// [`super::RedirectResolver`].
pub struct LinkService<S: LinkStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LinkStore + ?Sized> LinkService<S> {
    /// Creates a new link service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Retrieves a link by its short code without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::CodeNotFound`] if no link matches the code.
    /// Returns [`LinkError::StoreUnavailable`] on store errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, LinkError> {
        self.store
            .get_by_code(code)
            .await?
            .ok_or_else(|| LinkError::CodeNotFound(code.to_string()))
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, LinkError> {
        Ok(self.store.list_all().await?)
    }

    /// Deletes a link. Missing codes are ignored.
    pub async fn delete_link(&self, code: &str) -> Result<(), LinkError> {
        Ok(self.store.delete_by_code(code).await?)
    }

    /// Checks that the store answers.
    pub async fn check_store(&self) -> Result<(), LinkError> {
        Ok(self.store.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;
    use crate::domain::repositories::MockLinkStore;
    use chrono::{Duration, Utc};

    fn create_test_link(id: i64, code: &str, age_minutes: i64) -> Link {
        Link::new(
            id,
            code.to_string(),
            "https://example.com".to_string(),
            Utc::now() - Duration::minutes(age_minutes),
            0,
            None,
        )
    }

    #[tokio::test]
    async fn test_get_link_found() {
        let mut store = MockLinkStore::new();
        let link = create_test_link(1, "abc123", 0);
        store
            .expect_get_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = LinkService::new(Arc::new(store));
        let found = service.get_link("abc123").await.unwrap();

        assert_eq!(found.id, 1);
        assert_eq!(found.code, "abc123");
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut store = MockLinkStore::new();
        store.expect_get_by_code().times(1).returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(store));

        assert_eq!(
            service.get_link("ABC123").await.unwrap_err(),
            LinkError::CodeNotFound("ABC123".into())
        );
    }

    #[tokio::test]
    async fn test_list_links_passes_order_through() {
        let mut store = MockLinkStore::new();
        let links = vec![create_test_link(2, "newer1", 1), create_test_link(1, "older1", 5)];
        store
            .expect_list_all()
            .times(1)
            .returning(move || Ok(links.clone()));

        let service = LinkService::new(Arc::new(store));
        let listed = service.list_links().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].code, "newer1");
        assert_eq!(listed[1].code, "older1");
    }

    #[tokio::test]
    async fn test_delete_link() {
        let mut store = MockLinkStore::new();
        store
            .expect_delete_by_code()
            .withf(|code| code == "gone01")
            .times(1)
            .returning(|_| Ok(()));

        let service = LinkService::new(Arc::new(store));

        assert!(service.delete_link("gone01").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_link_store_failure() {
        let mut store = MockLinkStore::new();
        store
            .expect_delete_by_code()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("down".into())));

        let service = LinkService::new(Arc::new(store));

        assert!(matches!(
            service.delete_link("gone01").await,
            Err(LinkError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_check_store() {
        let mut store = MockLinkStore::new();
        store.expect_ping().times(1).returning(|| Ok(()));

        let service = LinkService::new(Arc::new(store));

        assert!(service.check_store().await.is_ok());
    }
}
