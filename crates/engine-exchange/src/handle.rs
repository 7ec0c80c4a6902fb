//! Cloneable async handle to the engine task.

use engine_core::{
    AttemptOutcome, MatchingEngine, NewOrder, OrderBook, OrderEntry, OrderId, Withdrawal,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::engine_task::run_engine_loop;
use crate::error::ExchangeError;
use crate::types::{EngineRequest, EngineTx};

/// Front door to the book. Every call is one request to the engine task.
#[derive(Debug, Clone)]
pub struct BookHandle {
    tx: EngineTx,
}

impl BookHandle {
    /// Move `engine` into a new engine task.
    ///
    /// The task stops once every clone of the returned handle is dropped
    /// and yields the final book through the join handle.
    pub fn spawn(engine: MatchingEngine) -> (BookHandle, JoinHandle<OrderBook>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_engine_loop(engine, rx));
        (BookHandle { tx }, task)
    }

    pub async fn create_order(&self, order: NewOrder) -> Result<OrderEntry, ExchangeError> {
        let entry = self
            .request(|reply| EngineRequest::CreateOrder { order, reply })
            .await??;
        Ok(entry)
    }

    /// Append without waiting; ordering with later requests is preserved.
    pub fn add(&self, entry: OrderEntry) -> Result<(), ExchangeError> {
        self.tx
            .send(EngineRequest::Add { entry })
            .map_err(|_| ExchangeError::EngineClosed)
    }

    pub async fn attempt(&self, order: OrderEntry) -> Result<AttemptOutcome, ExchangeError> {
        let outcome = self
            .request(|reply| EngineRequest::Attempt { order, reply })
            .await??;
        Ok(outcome)
    }

    pub async fn withdraw(&self, id: OrderId) -> Result<Withdrawal, ExchangeError> {
        self.request(|reply| EngineRequest::Withdraw { id, reply }).await
    }

    pub async fn cancel(&self, id: OrderId) -> Result<usize, ExchangeError> {
        self.request(|reply| EngineRequest::Cancel { id, reply }).await
    }

    pub async fn snapshot(&self) -> Result<OrderBook, ExchangeError> {
        self.request(|reply| EngineRequest::Snapshot { reply }).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> EngineRequest,
    ) -> Result<T, ExchangeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .map_err(|_| ExchangeError::EngineClosed)?;
        rx.await.map_err(|_| ExchangeError::EngineClosed)
    }
}
