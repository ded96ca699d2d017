//! Domain layer containing the link entity, short code rules and store contract.
//!
//! Nothing in here depends on PostgreSQL, Axum or any other infrastructure
//! crate. The allocation and resolution logic that operates on these types
//! lives in [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::Link`] record and its creation input
//! - [`short_code`] - Validated short code value type and random generation
//! - [`repositories`] - The [`repositories::LinkStore`] trait implemented by storage backends
//! - [`errors`] - Typed failures returned by the core and by stores

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod short_code;

pub use errors::{LinkError, StoreError};
pub use short_code::ShortCode;
