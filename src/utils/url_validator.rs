//! Target URL validation.
//!
//! Links may only point at absolute `http` or `https` URLs with a host. The
//! accepted string is stored exactly as given (after trimming surrounding
//! whitespace); nothing is rewritten or normalized.

use std::borrow::Cow;
use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("URL contains whitespace or control characters")]
    IllegalCharacters,
}

/// Checks that `input` is an absolute HTTP(S) URL and returns the trimmed form.
///
/// Embedded whitespace and control characters are refused because the value
/// ends up verbatim in a `Location` header.
///
/// # Errors
///
/// Returns [`UrlValidationError`] describing the first rule violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_target_url(" https://a.com ").unwrap(), "https://a.com");
/// assert!(validate_target_url("ftp://a.com").is_err());
/// assert!(validate_target_url("/relative/path").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<&str, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlValidationError::IllegalCharacters);
    }

    let url =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(trimmed),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// ASCII form of a stored target, suitable for a `Location` header.
///
/// ASCII targets are returned unchanged. Others are re-serialized by the URL
/// parser, which punycodes the host and percent-encodes the rest.
pub fn to_location(target: &str) -> Cow<'_, str> {
    if target.is_ascii() {
        return Cow::Borrowed(target);
    }

    match Url::parse(target) {
        Ok(url) => Cow::Owned(url.into()),
        Err(_) => Cow::Borrowed(target),
    }
}
