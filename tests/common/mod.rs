#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use tinylink::domain::StoreError;
use tinylink::domain::entities::{Link, NewLink};
use tinylink::domain::repositories::LinkStore;
use tinylink::infrastructure::persistence::InMemoryLinkStore;
use tinylink::routes::build_router;
use tinylink::state::AppState;

pub const BASE_URL: &str = "https://s.example.com";

/// State over a fresh in-memory store. The store handle is returned so tests
/// can seed or inspect it directly.
pub fn create_test_state() -> (AppState, Arc<InMemoryLinkStore>) {
    let store = Arc::new(InMemoryLinkStore::new());
    let state = AppState::new(store.clone(), BASE_URL, 10);
    (state, store)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryLinkStore>) {
    let (state, store) = create_test_state();
    let server = TestServer::new(build_router(state)).unwrap();
    (server, store)
}

/// Server whose store fails every call.
pub fn create_failing_server() -> TestServer {
    let state = AppState::new(Arc::new(UnavailableStore), BASE_URL, 10);
    TestServer::new(build_router(state)).unwrap()
}

pub async fn create_test_link(store: &InMemoryLinkStore, code: &str, url: &str) -> Link {
    let code = tinylink::domain::ShortCode::parse(code).unwrap();
    store.insert_if_absent(NewLink::new(code, url)).await.unwrap()
}

/// Store that is always down.
pub struct UnavailableStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl LinkStore for UnavailableStore {
    async fn insert_if_absent(&self, _link: NewLink) -> Result<Link, StoreError> {
        Err(down())
    }

    async fn increment_and_fetch(&self, _code: &str) -> Result<Option<String>, StoreError> {
        Err(down())
    }

    async fn get_by_code(&self, _code: &str) -> Result<Option<Link>, StoreError> {
        Err(down())
    }

    async fn list_all(&self) -> Result<Vec<Link>, StoreError> {
        Err(down())
    }

    async fn delete_by_code(&self, _code: &str) -> Result<(), StoreError> {
        Err(down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}
