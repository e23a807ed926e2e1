//! Value object trait: equality by value, not identity.

/// Marker trait for immutable domain values compared by their attributes.
///
/// A size vector of `{M: 10}` equals every other `{M: 10}`, while a purchase
/// order equals only itself (see [`Entity`](crate::Entity)). "Modifying" a
/// value object means building a new one, which is what lets the engine hand
/// frozen copies to snapshots and ledger entries without aliasing worries.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
