//! Fixed sample data for the demo program.

use engine_core::{NewOrder, OrderEntry};

use crate::error::ExchangeError;
use crate::handle::BookHandle;

/// Initial book: `(volume, side, price)`, no expiry.
pub const SEED_ORDERS: [(i64, &str, f64); 10] = [
    (100, "Bid", 10.0),
    (50, "Bid", 20.0),
    (100, "Bid", 20.0),
    (30, "Bid", 10.0),
    (50, "Ask", 20.0),
    (50, "Ask", 40.0),
    (100, "Ask", 50.0),
    (10, "Ask", 70.0),
    (30, "Bid", 40.0),
    (30, "Bid", 50.0),
];

/// Incoming batch: `(volume, side, price, expiry seconds)`.
pub const SAMPLE_BATCH: [(i64, &str, f64, u64); 4] = [
    (50, "Bid", 20.0, 0),
    (50, "Ask", 20.0, 5),
    (20, "Bid", 40.0, 5),
    (100, "Bid", 30.0, 10),
];

/// Create and add every [`SEED_ORDERS`] entry; returns how many were added.
pub async fn seed_book(book: &BookHandle) -> Result<usize, ExchangeError> {
    for (volume, side, price) in SEED_ORDERS {
        let entry = book.create_order(NewOrder::from_parts(volume, side, price, 0)?).await?;
        book.add(entry)?;
    }
    Ok(SEED_ORDERS.len())
}

/// Create (but do not add) the [`SAMPLE_BATCH`] orders.
pub async fn sample_batch(book: &BookHandle) -> Result<Vec<OrderEntry>, ExchangeError> {
    let mut orders = Vec::with_capacity(SAMPLE_BATCH.len());
    for (volume, side, price, expiry_secs) in SAMPLE_BATCH {
        let order = NewOrder::from_parts(volume, side, price, expiry_secs)?;
        orders.push(book.create_order(order).await?);
    }
    Ok(orders)
}
