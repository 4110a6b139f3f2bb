//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// This is a closed taxonomy: every failure the system can surface is one of
/// these variants, carried through `Result` and mapped to a transport status
/// code only at the HTTP boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed shape validation before any side effect ran.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced record does not exist.
    #[error("not found")]
    NotFound,

    /// The lesson has no seats left; the booking was not admitted.
    #[error("no spaces available")]
    CapacityExhausted,

    /// The storage collaborator was unreachable or a write did not apply.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Anything that does not fit the variants above.
    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn capacity_exhausted() -> Self {
        Self::CapacityExhausted
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// True for the terminal business outcomes that must not be retried by
    /// the server (the caller decides whether to resubmit).
    pub fn is_terminal_business_outcome(&self) -> bool {
        matches!(self, Self::NotFound | Self::CapacityExhausted)
    }
}
