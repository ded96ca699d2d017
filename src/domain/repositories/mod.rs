//! Store trait definitions for the domain layer.
//!
//! The core only talks to storage through [`LinkStore`]. Implementations live
//! in `crate::infrastructure::persistence`; a `mockall` mock is generated for
//! unit tests.

pub mod link_store;

pub use link_store::LinkStore;

#[cfg(test)]
pub use link_store::MockLinkStore;
