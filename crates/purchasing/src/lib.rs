//! Purchase order consolidation and receiving reconciliation.
//!
//! Takes independently created customer orders (quotes and jobs), merges
//! them into supplier-facing purchase orders, and reconciles partial
//! delivery receipts back against the originating orders per size bucket.
//!
//! Implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage): the caller owns persistence and passes in identifiers and
//! timestamps, so every operation is a pure transformation from the prior
//! purchase order to a new one.

pub mod consolidate;
pub mod order;
pub mod receiving;
pub mod reconcile;

pub use consolidate::{consolidate, ConsolidationRequest};
pub use order::{
    derive_status, AssignedOrder, AssociatedOrderRef, LineItemId, PurchaseOrder, PurchaseOrderId,
    PurchaseOrderLineItem, PurchaseOrderStatus, ReceiptId, ReceiptRecord, StyleId, SupplierId,
};
pub use receiving::ReceivingSession;
pub use reconcile::{commit, receive, OverReceiptPolicy};
