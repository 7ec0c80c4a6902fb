//! engine-exchange
//!
//! Async runtime around `engine-core`: a single engine task owns the
//! book, and each incoming order runs an expiry-driven retry loop
//! against it through a [`BookHandle`].

pub mod config;
pub mod error;
pub mod exchange;
pub mod handle;
pub mod retry;
pub mod seed;
pub mod types;

// internal: only reachable through `BookHandle::spawn`
mod engine_task;

pub use config::Config;
pub use error::ExchangeError;
pub use exchange::{run_exchange, withdraw_orders, ExecutionMode};
pub use handle::BookHandle;
pub use retry::{run_retry_loop, RetryOutcome, DEFAULT_POLL_INTERVAL};
