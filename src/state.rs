//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::{CodeAllocator, LinkService, RedirectResolver};
use crate::domain::repositories::LinkStore;

/// Services built around one injected link store.
///
/// Cloning is cheap: every field is an `Arc` or a short string.
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<CodeAllocator<dyn LinkStore>>,
    pub resolver: Arc<RedirectResolver<dyn LinkStore>>,
    pub link_service: Arc<LinkService<dyn LinkStore>>,
    /// Public origin used to build `shortUrl` values, without trailing slash.
    pub base_url: String,
}

impl AppState {
    /// Wires the allocator, resolver and link service to `store`.
    pub fn new(store: Arc<dyn LinkStore>, base_url: &str, max_attempts: usize) -> Self {
        Self {
            allocator: Arc::new(CodeAllocator::with_max_attempts(store.clone(), max_attempts)),
            resolver: Arc::new(RedirectResolver::new(store.clone())),
            link_service: Arc::new(LinkService::new(store)),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full public URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
