//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic, caller-recoverable validation failure:
/// correcting the input makes the same call succeed. Validation always runs
/// before mutation, so a failed operation never leaves a purchase order
/// partially updated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Consolidation was attempted over a selection with no order lines.
    #[error("cannot build a purchase order from an empty order selection")]
    EmptySelection,

    /// A receiving commit had no receiver identity or no staged quantities.
    #[error("empty receipt: {0}")]
    EmptyReceipt(String),

    /// A receipt would push a size bucket past its ordered quantity.
    #[error(
        "over-receipt on line item {line_item} ({size}): ordered {ordered}, would hold {would_hold}"
    )]
    OverReceipt {
        line_item: String,
        size: String,
        ordered: u32,
        would_hold: u32,
    },

    /// An operation referenced a line item the purchase order does not carry.
    #[error("unknown line item: {0}")]
    UnknownLineItem(String),

    /// Quick-fill referenced an order that never contributed to the line item.
    #[error("unknown associated order: {0}")]
    UnknownAssociatedOrder(String),

    /// A size label outside the fixed size run.
    #[error("unknown size label: {0}")]
    UnknownSize(String),

    /// A purchase order lifecycle invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn empty_receipt(msg: impl Into<String>) -> Self {
        Self::EmptyReceipt(msg.into())
    }

    pub fn unknown_line(id: impl Into<String>) -> Self {
        Self::UnknownLineItem(id.into())
    }

    pub fn unknown_associated_order(id: impl Into<String>) -> Self {
        Self::UnknownAssociatedOrder(id.into())
    }

    pub fn unknown_size(label: impl Into<String>) -> Self {
        Self::UnknownSize(label.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
