//! Domain error model.

use thiserror::Error;

use crate::id::MemberId;
use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// integrity, arithmetic). Store and transport concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// The caller is not allowed to see or change the resource.
    #[error("unauthorized")]
    Unauthorized,

    /// A stored record is malformed (negative amount, duplicate split, ...).
    #[error("data integrity: {0}")]
    DataIntegrity(String),

    /// A settlement repays more than the payer owes the receiver.
    ///
    /// Only raised under the rejecting overpayment policy.
    #[error("settlement of {amount} from {payer} to {receiver} exceeds outstanding debt of {outstanding}")]
    Overpayment {
        payer: MemberId,
        receiver: MemberId,
        amount: Money,
        outstanding: Money,
    },

    /// Fixed-point arithmetic left the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn data_integrity(msg: impl Into<String>) -> Self {
        Self::DataIntegrity(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
