// crates/engine-protocol/src/record_codec.rs

//! Pipe-delimited record format for book snapshots.
//!
//! One entry per line:
//!
//! `id|side|price|volume|fulfilled`
//!
//! - `side`: `Bid` or `Ask`
//! - `price`: fixed point, six decimals (`20.000000`)
//! - `volume`: integer
//! - `fulfilled`: `true` / `false`
//!
//! Fulfilled entries are written like any other; nothing is filtered.

use engine_core::{OrderBook, OrderEntry};

pub const FIELD_SEPARATOR: char = '|';

/// Format a single entry as a record line (without trailing newline).
pub fn format_record(entry: &OrderEntry) -> String {
    format!(
        "{id}{sep}{side}{sep}{price:.6}{sep}{volume}{sep}{fulfilled}",
        id = entry.id(),
        side = entry.side(),
        price = entry.price(),
        volume = entry.volume(),
        fulfilled = entry.is_fulfilled(),
        sep = FIELD_SEPARATOR,
    )
}

/// Every entry of `book`, in insertion order, one newline-terminated
/// record per entry.
pub fn format_book(book: &OrderBook) -> String {
    book.entries()
        .iter()
        .map(|entry| {
            let mut line = format_record(entry);
            line.push('\n');
            line
        })
        .collect()
}
