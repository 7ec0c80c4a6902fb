//! Batch driver: run a retry loop for every incoming order.
//!
//! - `Sequential`: one loop at a time, each to completion, in input order.
//! - `Concurrent`: every loop spawned at once. The engine task still
//!   serializes book access, so loops can only race on *which* request
//!   reaches the book first.

use std::str::FromStr;
use std::time::Duration;

use engine_core::{OrderEntry, OrderId, Withdrawal};
use serde::Deserialize;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::info;

use crate::error::ExchangeError;
use crate::handle::BookHandle;
use crate::retry::{run_retry_loop, RetryOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Concurrent,
}

#[derive(Debug, Error)]
#[error("unknown execution mode {0:?}: expected \"sequential\" or \"concurrent\"")]
pub struct ParseModeError(String);

impl FromStr for ExecutionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "concurrent" => Ok(ExecutionMode::Concurrent),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Process `orders` and return one result per order, in input order.
///
/// Dropping the returned future stops every in-flight loop: sequential
/// loops are dropped with it and concurrent ones are aborted by the
/// `JoinSet`.
pub async fn run_exchange(
    book: &BookHandle,
    orders: Vec<OrderEntry>,
    mode: ExecutionMode,
    poll_interval: Duration,
) -> Vec<Result<RetryOutcome, ExchangeError>> {
    info!(orders = orders.len(), ?mode, ?poll_interval, "processing batch");

    match mode {
        ExecutionMode::Sequential => {
            let mut results = Vec::with_capacity(orders.len());
            for order in orders {
                results.push(run_retry_loop(book, order, poll_interval).await);
            }
            results
        }
        ExecutionMode::Concurrent => {
            let count = orders.len();
            let mut tasks = JoinSet::new();
            for (idx, order) in orders.into_iter().enumerate() {
                let book = book.clone();
                tasks.spawn(async move { (idx, run_retry_loop(&book, order, poll_interval).await) });
            }

            let mut slots: Vec<Option<Result<RetryOutcome, ExchangeError>>> =
                (0..count).map(|_| None).collect();
            let mut failures = Vec::new();
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((idx, result)) => slots[idx] = Some(result),
                    Err(err) => failures.push(err),
                }
            }

            // A panicked loop loses its index; fill the gaps in order.
            let mut failures = failures.into_iter();
            slots
                .into_iter()
                .map(|slot| match slot {
                    Some(result) => result,
                    None => match failures.next() {
                        Some(err) => Err(ExchangeError::Task(err)),
                        None => Err(ExchangeError::EngineClosed),
                    },
                })
                .collect()
        }
    }
}

/// Withdraw orders whose loops were stopped early; returns how many book
/// entries were removed.
///
/// Orders that already matched are untouched, so this is safe to call
/// for a whole batch after an interrupt.
pub async fn withdraw_orders(book: &BookHandle, ids: &[OrderId]) -> Result<usize, ExchangeError> {
    let mut removed = 0;
    for id in ids {
        if let Withdrawal::Removed(count) = book.withdraw(id.clone()).await? {
            removed += count;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Sequential".parse::<ExecutionMode>().unwrap(), ExecutionMode::Sequential);
        assert_eq!(" concurrent ".parse::<ExecutionMode>().unwrap(), ExecutionMode::Concurrent);
        assert!("parallel".parse::<ExecutionMode>().is_err());
    }
}
