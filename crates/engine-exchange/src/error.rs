//! Errors surfaced by the exchange runtime.

use engine_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Rejected by the matching engine (validation or id generation).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The engine task has stopped; no book to talk to.
    #[error("engine task is no longer running")]
    EngineClosed,

    /// A spawned retry loop panicked or was aborted.
    #[error("retry task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
