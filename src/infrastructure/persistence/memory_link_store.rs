//! In-memory implementation of the link store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkStore;

/// Process-local link store backed by `DashMap`.
///
/// The entry API holds the shard lock for the duration of an insert or an
/// increment, which gives the same per-code atomicity as the PostgreSQL
/// store. State is lost when the process exits.
#[derive(Debug)]
pub struct InMemoryLinkStore {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Default for InMemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Link, StoreError> {
        match self.links.entry(new_link.code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StoreError::CodeTaken(new_link.code.into_inner())),
            Entry::Vacant(slot) => {
                let link = Link::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    new_link.code.into_inner(),
                    new_link.target_url,
                    Utc::now(),
                    0,
                    None,
                );
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn increment_and_fetch(&self, code: &str) -> Result<Option<String>, StoreError> {
        let Some(mut link) = self.links.get_mut(code) else {
            return Ok(None);
        };

        link.total_clicks += 1;
        link.last_clicked_at = Some(Utc::now());
        Ok(Some(link.target_url.clone()))
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Link>, StoreError> {
        Ok(self.links.get(code).map(|link| link.value().clone()))
    }

    async fn list_all(&self) -> Result<Vec<Link>, StoreError> {
        let mut links: Vec<Link> = self.links.iter().map(|entry| entry.value().clone()).collect();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(links)
    }

    async fn delete_by_code(&self, code: &str) -> Result<(), StoreError> {
        self.links.remove(code);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
