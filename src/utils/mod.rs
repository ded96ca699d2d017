//! Utility functions shared by the services and HTTP handlers.
//!
//! - [`url_validator`] - Target URL validation and `Location` encoding

pub mod url_validator;
