//! Application layer services implementing the link core.
//!
//! Services consume the [`crate::domain::repositories::LinkStore`] trait and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::CodeAllocator`] - Code validation, generation and link creation
//! - [`services::RedirectResolver`] - Code resolution with atomic click counting
//! - [`services::LinkService`] - Lookup, listing and deletion

pub mod services;
