//! Identifier minting for engine-created records.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

/// Source of new identifiers for records the engine creates (purchase
/// orders, line items, receipt entries).
///
/// Injected into every minting operation so callers own uniqueness and tests
/// can supply deterministic ids.
pub trait IdGenerator {
    /// Mint a fresh identifier carrying `prefix`, e.g. `po` or `rcv`.
    fn next(&self, prefix: &str) -> String;
}

/// Production generator backed by time-ordered UUIDv7 suffixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::now_v7().simple())
    }
}

/// Deterministic generator: `po-0001`, `po-0002`, … with one counter per
/// prefix. Intended for tests and import tooling.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    counters: Mutex<HashMap<String, u64>>,
}

impl SequenceIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next(&self, prefix: &str) -> String {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        let counter = counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        let value = *counter;
        format!("{prefix}-{value:04}")
    }
}
