//! Error types for the core matching logic.
//!
//! Book lookups are infallible by design (cancel / fulfill on an unknown
//! id is a no-op), so errors only arise when *creating* entries: either
//! the input is malformed or no identifier could be produced.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The identifier generator could not produce an id (entropy source
    /// failed). The entry must not be created.
    #[error("failed to generate order id: {0}")]
    IdGeneration(String),

    /// Volume must be strictly positive.
    #[error("invalid volume {0}: must be greater than zero")]
    InvalidVolume(i64),

    /// Price must be finite and strictly positive.
    #[error("invalid price {0}: must be a finite positive number")]
    InvalidPrice(f64),

    /// Side string was empty or not one of `bid` / `ask`.
    #[error("invalid side {0:?}: expected \"bid\" or \"ask\"")]
    InvalidSide(String),
}
