//! Entity trait: identity + continuity across state changes.

/// Marker + minimal interface for domain objects with identity.
///
/// Two entities with the same id are the same entity regardless of the rest
/// of their fields; anything compared purely by its attribute values belongs
/// under [`ValueObject`](crate::ValueObject) instead.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
