//! `stitchworks-sizes` — the fixed garment size run and quantity vectors.
//!
//! Everything here is purely deterministic domain logic (no IO, no HTTP, no
//! storage): the seven-bucket size run, and [`SizeVector`] arithmetic used by
//! order consolidation and receiving reconciliation.

pub mod size;
pub mod vector;

pub use size::Size;
pub use vector::SizeVector;
