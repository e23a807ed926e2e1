//! Source customer orders (quotes and jobs).
//!
//! This crate holds the read-only view of customer demand that the
//! purchasing crate consolidates into supplier purchase orders,
//! implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod source;

pub use source::{OrderKind, SourceLineItem, SourceOrder, SourceOrderId};
