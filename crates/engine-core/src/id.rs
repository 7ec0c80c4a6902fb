//! Order identifiers and their generators.
//!
//! The book only ever compares ids for equality, so [`OrderId`] is an
//! opaque string. Production ids are random RFC 4122 version-4 UUIDs;
//! tests use [`SequentialIdGenerator`] for readable, deterministic ids.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Builder;

use crate::error::EngineError;

/// Opaque, process-unique order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        OrderId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Source of unique order ids.
///
/// Generation may fail (e.g. the entropy source is unavailable); callers
/// must then refuse to create the entry.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Result<OrderId, EngineError>;
}

/// Random version-4 UUIDs read from the operating system's entropy source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Result<OrderId, EngineError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| EngineError::IdGeneration(e.to_string()))?;

        // Sets the version (4) and RFC 4122 variant bits.
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        Ok(OrderId(uuid.hyphenated().to_string()))
    }
}

/// Deterministic `<prefix>-<n>` ids, starting at 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIdGenerator {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        SequentialIdGenerator::new("order")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Result<OrderId, EngineError> {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Ok(OrderId(format!("{}-{}", self.prefix, n)))
    }
}
