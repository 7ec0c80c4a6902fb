//! Expiry-driven retry loop for one incoming order.
//!
//! While the loop runs the order is *polling*: on every tick it asks the
//! engine for one atomic attempt (match, settle, or rest on the book).
//! It ends in exactly one terminal state:
//!
//! - **matched**: an attempt settled the order, or another order's
//!   settlement consumed its resting copy;
//! - **expired**: the expiry alarm fired first; the order is withdrawn
//!   from the book.
//!
//! An order consumed between its last attempt and the alarm is still
//! matched: the withdrawal finds its fulfilled copy and leaves it alone.
//!
//! The first attempt runs immediately and unconditionally. After that the
//! alarm wins over a tick that is ready at the same instant, so an order
//! with zero expiry gets exactly one attempt.
//!
//! Both timers live inside the loop's future and are released when it
//! returns or is dropped.

use std::time::Duration;

use engine_core::{AttemptOutcome, OrderEntry, OrderId, Settlement, Withdrawal};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::ExchangeError;
use crate::handle::BookHandle;

/// Reference polling cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Terminal state of one retry loop.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome {
    Matched {
        order_id: OrderId,
        attempts: u32,
        /// `None` when the order was consumed as resting liquidity by
        /// another loop rather than settled by its own attempt.
        settlement: Option<Settlement>,
    },
    Expired {
        order_id: OrderId,
        attempts: u32,
        /// Book entries removed by the expiry withdrawal.
        removed: usize,
    },
}

impl RetryOutcome {
    pub fn order_id(&self) -> &OrderId {
        match self {
            RetryOutcome::Matched { order_id, .. } | RetryOutcome::Expired { order_id, .. } => {
                order_id
            }
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Matched { attempts, .. } | RetryOutcome::Expired { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, RetryOutcome::Matched { .. })
    }
}

/// Keep attempting `order` every `poll_interval` until it matches or its
/// expiry elapses.
///
/// If an attempt fails (e.g. no id for a residual could be generated),
/// the order is withdrawn from the book before the error is returned.
pub async fn run_retry_loop(
    book: &BookHandle,
    order: OrderEntry,
    poll_interval: Duration,
) -> Result<RetryOutcome, ExchangeError> {
    let order_id = order.id().clone();

    let expiry = time::sleep(order.expiry());
    tokio::pin!(expiry);

    // `interval` panics on a zero period.
    let mut ticker = time::interval(poll_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempts: u32 = 0;

    loop {
        tokio::select! {
            biased;

            _ = &mut expiry, if attempts > 0 => {
                match book.withdraw(order_id.clone()).await? {
                    Withdrawal::Consumed => {
                        info!(order_id = %order_id, attempts, "order consumed by a counterparty before expiry");
                        return Ok(RetryOutcome::Matched { order_id, attempts, settlement: None });
                    }
                    Withdrawal::Removed(removed) => {
                        info!(order_id = %order_id, attempts, removed, "order expired");
                        return Ok(RetryOutcome::Expired { order_id, attempts, removed });
                    }
                }
            }

            _ = ticker.tick() => {
                attempts += 1;

                let outcome = match book.attempt(order.clone()).await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        warn!(order_id = %order_id, attempts, error = %err, "attempt failed; withdrawing order");
                        // Best effort: the engine may be the thing that failed.
                        let _ = book.cancel(order_id.clone()).await;
                        return Err(err);
                    }
                };

                match outcome {
                    AttemptOutcome::Matched(settlement) => {
                        info!(
                            order_id = %order_id,
                            matched_id = %settlement.matched_id,
                            residual = ?settlement.residual.as_ref().map(|r| r.volume()),
                            attempts,
                            "order matched"
                        );
                        return Ok(RetryOutcome::Matched {
                            order_id,
                            attempts,
                            settlement: Some(settlement),
                        });
                    }
                    AttemptOutcome::Consumed => {
                        info!(order_id = %order_id, attempts, "order consumed by a counterparty");
                        return Ok(RetryOutcome::Matched { order_id, attempts, settlement: None });
                    }
                    AttemptOutcome::Resting { inserted } => {
                        debug!(order_id = %order_id, attempts, inserted, "no match");
                    }
                }
            }
        }
    }
}
