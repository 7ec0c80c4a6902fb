//! Shared types for the exchange runtime.
//!
//! This module defines:
//! - `EngineRequest`: messages flowing from retry loops to the engine task
//! - channel aliases between handles and the engine task

use engine_core::{
    AttemptOutcome, EngineError, NewOrder, OrderBook, OrderEntry, OrderId, Withdrawal,
};
use tokio::sync::{mpsc, oneshot};

/// One book operation, answered on its own oneshot reply channel.
///
/// The engine task handles requests strictly in arrival order, so each
/// variant is atomic with respect to every other loop.
#[derive(Debug)]
pub enum EngineRequest {
    /// Validate a new order and assign it an id (not added to the book).
    CreateOrder {
        order: NewOrder,
        reply: oneshot::Sender<Result<OrderEntry, EngineError>>,
    },

    /// Append an entry as-is (seed data).
    Add { entry: OrderEntry },

    /// One match / settle / rest step for a pending order.
    Attempt {
        order: OrderEntry,
        reply: oneshot::Sender<Result<AttemptOutcome, EngineError>>,
    },

    /// Pull a pending order unless a counterparty already consumed it.
    Withdraw {
        id: OrderId,
        reply: oneshot::Sender<Withdrawal>,
    },

    /// Remove every entry with this id; replies with the count removed.
    Cancel {
        id: OrderId,
        reply: oneshot::Sender<usize>,
    },

    /// Copy of the current book.
    Snapshot { reply: oneshot::Sender<OrderBook> },
}

/// Channel from handles → engine task.
pub type EngineTx = mpsc::UnboundedSender<EngineRequest>;
pub type EngineRx = mpsc::UnboundedReceiver<EngineRequest>;
