//! engine-core
//!
//! Pure matching logic for a single order book:
//! - order ids and their generators
//! - order entries and the order book
//! - the matcher (greedy nearest-price selection)
//! - settlement (residual volume, fulfillment)
//! - a matching engine tying them together

pub mod error;
pub mod id;
pub mod matcher;
pub mod matching_engine;
pub mod messages;
pub mod order;
pub mod order_book;
pub mod settlement;
pub mod side;

pub use error::EngineError;
pub use id::{IdGenerator, OrderId, RandomIdGenerator, SequentialIdGenerator};
pub use matcher::find_match;
pub use matching_engine::MatchingEngine;
pub use messages::{AttemptOutcome, NewOrder, Withdrawal};
pub use order::{OrderEntry, OrderStatus};
pub use order_book::OrderBook;
pub use settlement::{residual, settle, Residual, Settlement};
pub use side::Side;
