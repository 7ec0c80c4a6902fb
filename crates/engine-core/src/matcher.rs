//! Matcher: pick the resting entry an incoming order should trade with.
//!
//! This is deliberately *not* price-time priority. For an incoming bid the
//! active asks are walked in ascending price order:
//!
//! - an ask priced exactly at the bid wins immediately;
//! - otherwise every ask priced strictly below the bid replaces the
//!   current candidate, so the walk ends on the highest such ask.
//!
//! Incoming asks are symmetric: bids walked in descending price order,
//! exact price wins, otherwise the lowest bid still above the ask.
//!
//! Sorting is stable, so among equal prices the first inserted entry wins
//! an exact match while the last inserted one wins a non-exact match.

use std::cmp::Ordering;

use crate::id::OrderId;
use crate::order::OrderEntry;
use crate::order_book::OrderBook;
use crate::side::Side;

/// Find the id of the resting entry `order` should be settled against.
///
/// Only active entries on the opposite side are considered. The book is
/// not modified.
pub fn find_match(book: &OrderBook, order: &OrderEntry) -> Option<OrderId> {
    let mut resting = book.filter(order.side().opposite());

    match order.side() {
        // Bid: asks ascending, anything cheaper than the bid crosses.
        Side::Bid => resting.sort_by(|a, b| by_price(a, b)),
        // Ask: bids descending, anything richer than the ask crosses.
        Side::Ask => resting.sort_by(|a, b| by_price(b, a)),
    }

    let mut best: Option<&OrderEntry> = None;
    for candidate in resting {
        if candidate.price() == order.price() {
            return Some(candidate.id().clone());
        }
        if crosses(order, candidate) {
            best = Some(candidate);
        }
    }

    best.map(|e| e.id().clone())
}

/// Strict crossing test, excluding the exact-price case.
fn crosses(order: &OrderEntry, resting: &OrderEntry) -> bool {
    match order.side() {
        Side::Bid => resting.price() < order.price(),
        Side::Ask => resting.price() > order.price(),
    }
}

fn by_price(a: &OrderEntry, b: &OrderEntry) -> Ordering {
    a.price().total_cmp(&b.price())
}
