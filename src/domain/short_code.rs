//! Short code validation and random generation.
//!
//! A short code is 6-8 ASCII letters or digits, compared case-sensitively.
//! Generated codes are always 6 characters drawn uniformly from the 62-symbol
//! alphabet, which gives 62^6 (about 5.6e10) possible values.

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use crate::domain::errors::LinkError;

/// Shortest accepted code.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest accepted code.
pub const MAX_CODE_LENGTH: usize = 8;

/// Length of randomly generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("code pattern is valid"));

/// A code that satisfies the format rules.
///
/// Construct through [`ShortCode::parse`] for user input or
/// [`ShortCode::generate`] for random allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Validates a caller-supplied code.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidCode`] unless the input is 6-8 characters
    /// from `[A-Za-z0-9]`.
    pub fn parse(input: &str) -> Result<Self, LinkError> {
        if CODE_REGEX.is_match(input) {
            Ok(Self(input.to_owned()))
        } else {
            Err(LinkError::InvalidCode(input.to_owned()))
        }
    }

    /// Draws a fresh 6-character code from `rng`.
    ///
    /// Each character is sampled independently and uniformly from the
    /// alphanumeric alphabet. Codes are public identifiers, so the source does
    /// not need to be cryptographically secure.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let code = (0..GENERATED_CODE_LENGTH)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
