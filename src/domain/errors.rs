//! Error types for link allocation, resolution and storage.

use thiserror::Error;

/// Failures returned by the allocator, resolver and link service.
///
/// `InvalidTarget`, `InvalidCode` and `CodeConflict` are caller mistakes.
/// `CodeNotFound` is an expected miss. `AllocationExhausted` and
/// `StoreUnavailable` are operational and safe to retry later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("invalid target url: {0}")]
    InvalidTarget(String),

    #[error("invalid short code '{0}': expected 6-8 characters from [A-Za-z0-9]")]
    InvalidCode(String),

    #[error("short code '{0}' is already in use")]
    CodeConflict(String),

    #[error("short code '{0}' not found")]
    CodeNotFound(String),

    #[error("no free short code found after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("link store unavailable: {0}")]
    StoreUnavailable(String),
}

impl LinkError {
    /// Whether the same call may succeed if repeated later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::AllocationExhausted { .. } | Self::StoreUnavailable(_)
        )
    }
}

/// Failures reported by a [`crate::domain::repositories::LinkStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The conditional insert lost: a link with this code already exists.
    #[error("code '{0}' is already taken")]
    CodeTaken(String),

    /// Transport, timeout or any other infrastructure failure.
    #[error("{0}")]
    Unavailable(String),
}

impl From<StoreError> for LinkError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CodeTaken(code) => Self::CodeConflict(code),
            StoreError::Unavailable(reason) => Self::StoreUnavailable(reason),
        }
    }
}
