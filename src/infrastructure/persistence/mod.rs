//! Link store implementations.
//!
//! # Stores
//!
//! - [`PgLinkStore`] - PostgreSQL via SQLx, the production backend
//! - [`InMemoryLinkStore`] - `DashMap`-backed store for tests and throwaway runs

pub mod memory_link_store;
pub mod pg_link_store;

pub use memory_link_store::InMemoryLinkStore;
pub use pg_link_store::PgLinkStore;
