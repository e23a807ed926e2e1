//! `stitchworks-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): the error model, identifier minting, money, and the
//! entity/value-object markers shared by the order and purchasing crates.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{IdGenerator, SequenceIdGenerator, UuidIdGenerator};
pub use money::Money;
pub use value_object::ValueObject;
