//! Single-book matching simulation.
//!
//! Seeds the book, shows it, runs the sample batch through the retry
//! loops, saves a snapshot and shows the book again.
//!
//! On Ctrl-C the in-flight loops are dropped and their orders withdrawn
//! before the snapshot, so nothing left on the book looks live without a
//! loop retrying it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine_core::MatchingEngine;
use engine_exchange::seed::{sample_batch, seed_book};
use engine_exchange::{
    run_exchange, withdraw_orders, BookHandle, Config, ExchangeError, ExecutionMode, RetryOutcome,
};
use engine_protocol::write_snapshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "engine-exchange")]
#[clap(about = "Single-book limit-order matching simulation")]
struct Cli {
    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Run retry loops one at a time or all at once
    #[clap(short, long, value_enum)]
    mode: Option<ExecutionMode>,

    /// Retry loop polling period in milliseconds
    #[clap(short, long)]
    poll_interval_ms: Option<u64>,

    /// Directory for the order book snapshot
    #[clap(short, long)]
    snapshot_dir: Option<PathBuf>,

    /// Start from an empty book
    #[clap(long)]
    no_seed: bool,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli)?;
    info!(?config, "starting exchange");

    let (book, engine_task) = BookHandle::spawn(MatchingEngine::new());

    if config.seed {
        let seeded = seed_book(&book).await.context("seeding order book")?;
        info!(seeded, "order book seeded");
    }
    print!("{}", book.snapshot().await?.view());

    let orders = sample_batch(&book).await.context("creating sample orders")?;
    let order_ids: Vec<_> = orders.iter().map(|order| order.id().clone()).collect();

    tokio::select! {
        results = run_exchange(&book, orders, config.mode, config.poll_interval()) => {
            report(&results);
        }
        _ = tokio::signal::ctrl_c() => {
            let removed = withdraw_orders(&book, &order_ids).await?;
            warn!(removed, "interrupted; in-flight orders withdrawn");
        }
    }

    let final_book = book.snapshot().await?;
    match write_snapshot(&final_book, &config.snapshot_dir) {
        Ok(path) => info!(path = %path.display(), entries = final_book.len(), "order book saved"),
        Err(err) => error!(error = %err, "failed to save order book"),
    }
    print!("{}", final_book.view());

    drop(book);
    engine_task.await.context("engine task failed")?;
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(ms) = cli.poll_interval_ms {
        config.poll_interval_ms = ms;
    }
    if let Some(dir) = &cli.snapshot_dir {
        config.snapshot_dir = dir.clone();
    }
    if cli.no_seed {
        config.seed = false;
    }
    config.validate()?;
    Ok(config)
}

fn report(results: &[Result<RetryOutcome, ExchangeError>]) {
    for result in results {
        match result {
            Ok(RetryOutcome::Matched { order_id, attempts, settlement }) => info!(
                order_id = %order_id,
                attempts,
                matched_id = ?settlement.as_ref().map(|s| s.matched_id.to_string()),
                residual_id = ?settlement
                    .as_ref()
                    .and_then(|s| s.residual.as_ref())
                    .map(|r| r.id().to_string()),
                "matched"
            ),
            Ok(RetryOutcome::Expired { order_id, attempts, removed }) => {
                info!(order_id = %order_id, attempts, removed, "expired")
            }
            Err(err) => error!(error = %err, "order failed"),
        }
    }
}
