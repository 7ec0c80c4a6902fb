//! Settlement: apply a match found by the [matcher](crate::matcher).
//!
//! Given the matched resting entry `M` and the incoming order `O`:
//!
//! | `M.volume - O.volume` | residual entry                        |
//! |-----------------------|---------------------------------------|
//! | `> 0`                 | difference, on `M`'s side/price/expiry |
//! | `< 0`                 | `abs`, on `O`'s side/price/expiry      |
//! | `== 0`                | none                                  |
//!
//! `M` is then marked fulfilled. `O` itself never goes on the book here;
//! only its residual (if any) does.

use crate::error::EngineError;
use crate::id::{IdGenerator, OrderId};
use crate::order::OrderEntry;
use crate::order_book::OrderBook;

/// Record of one applied match.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// The resting entry that was fulfilled.
    pub matched_id: OrderId,

    /// The incoming order.
    pub incoming_id: OrderId,

    /// Leftover liquidity re-inserted into the book, if volumes differed.
    pub residual: Option<OrderEntry>,
}

/// Which side of a match the leftover volume belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Residual {
    /// Resting entry was larger; leftover stays on its side.
    Resting(i64),
    /// Incoming order was larger; leftover goes on its side.
    Incoming(i64),
    /// Volumes were equal.
    None,
}

/// Compute the residual of matching `incoming` against `resting`.
pub fn residual(resting: &OrderEntry, incoming: &OrderEntry) -> Residual {
    let diff = resting.volume() - incoming.volume();
    match diff {
        d if d > 0 => Residual::Resting(d),
        d if d < 0 => Residual::Incoming(d.abs()),
        _ => Residual::None,
    }
}

/// Settle `incoming` against the active entry `matched_id`.
///
/// The residual id is generated before the book is touched, so a
/// generator failure leaves the book unchanged. Returns `Ok(None)` when
/// `matched_id` is no longer active.
pub fn settle(
    book: &mut OrderBook,
    matched_id: &OrderId,
    incoming: &OrderEntry,
    ids: &dyn IdGenerator,
) -> Result<Option<Settlement>, EngineError> {
    let matched = match book.get_active(matched_id) {
        Some(entry) => entry.clone(),
        None => return Ok(None),
    };

    let leftover = match residual(&matched, incoming) {
        Residual::Resting(volume) => Some(OrderEntry::residual_of(&matched, ids.next_id()?, volume)),
        Residual::Incoming(volume) => Some(OrderEntry::residual_of(incoming, ids.next_id()?, volume)),
        Residual::None => None,
    };

    if let Some(entry) = &leftover {
        book.add(entry.clone());
    }
    book.fulfill(matched_id);

    Ok(Some(Settlement {
        matched_id: matched_id.clone(),
        incoming_id: incoming.id().clone(),
        residual: leftover,
    }))
}
