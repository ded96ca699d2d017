//! Business logic services for the application layer.

pub mod allocator;
pub mod link_service;
pub mod resolver;

pub use allocator::CodeAllocator;
pub use link_service::LinkService;
pub use resolver::RedirectResolver;
