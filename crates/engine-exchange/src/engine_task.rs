//! Central engine loop.
//!
//! This task owns the `MatchingEngine` (and so the order book) and
//! processes every `EngineRequest` coming from retry loops, one at a
//! time. No other task ever touches the book.

use engine_core::{MatchingEngine, OrderBook};
use tracing::{debug, info};

use crate::types::{EngineRequest, EngineRx};

/// Run the central engine processing loop until every sender is gone.
///
/// Returns the final book. Replies to callers that stopped waiting are
/// dropped silently.
pub(crate) async fn run_engine_loop(mut engine: MatchingEngine, mut engine_rx: EngineRx) -> OrderBook {
    info!(entries = engine.book().len(), "engine loop started");

    while let Some(req) = engine_rx.recv().await {
        match req {
            EngineRequest::CreateOrder { order, reply } => {
                let _ = reply.send(engine.create_order(&order));
            }
            EngineRequest::Add { entry } => {
                debug!(order_id = %entry.id(), side = %entry.side(), price = entry.price(), volume = entry.volume(), "add");
                engine.add(entry);
            }
            EngineRequest::Attempt { order, reply } => {
                let _ = reply.send(engine.attempt(&order));
            }
            EngineRequest::Withdraw { id, reply } => {
                let withdrawal = engine.withdraw(&id);
                debug!(order_id = %id, ?withdrawal, "withdraw");
                let _ = reply.send(withdrawal);
            }
            EngineRequest::Cancel { id, reply } => {
                let removed = engine.cancel(&id);
                debug!(order_id = %id, removed, "cancel");
                let _ = reply.send(removed);
            }
            EngineRequest::Snapshot { reply } => {
                let _ = reply.send(engine.book().clone());
            }
        }
    }

    info!("engine loop shutting down (engine_rx closed)");
    engine.into_book()
}
