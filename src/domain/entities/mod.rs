//! Core domain entities.
//!
//! - [`Link`] - A persisted code to target URL mapping with click statistics
//! - [`NewLink`] - Input for the store's conditional insert

pub mod link;

pub use link::{Link, NewLink};
