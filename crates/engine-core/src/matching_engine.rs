//! Matching engine: the order book plus the id generator, with the
//! operations a retry loop needs as single atomic steps.
//!
//! - [`MatchingEngine::create_order`] validates and assigns an id.
//! - [`MatchingEngine::attempt`] runs one match / settle / rest step.
//! - [`MatchingEngine::withdraw`] pulls an expired order unless a
//!   counterparty already used it up.
//! - [`MatchingEngine::cancel`] hard-removes an order.
//!
//! The engine is synchronous and owns its book outright; sharing it
//! between concurrent loops is the caller's job (see the exchange's
//! engine task).

use std::fmt;

use crate::error::EngineError;
use crate::id::{IdGenerator, OrderId, RandomIdGenerator};
use crate::matcher::find_match;
use crate::messages::{AttemptOutcome, NewOrder, Withdrawal};
use crate::order::OrderEntry;
use crate::order_book::OrderBook;
use crate::settlement::settle;

pub struct MatchingEngine {
    book: OrderBook,
    ids: Box<dyn IdGenerator>,
}

impl MatchingEngine {
    /// Empty book, random UUID ids.
    pub fn new() -> Self {
        MatchingEngine::with_generator(Box::new(RandomIdGenerator))
    }

    /// Empty book with a custom id generator.
    pub fn with_generator(ids: Box<dyn IdGenerator>) -> Self {
        MatchingEngine::with_book(OrderBook::new(), ids)
    }

    /// Start from an existing book.
    pub fn with_book(book: OrderBook, ids: Box<dyn IdGenerator>) -> Self {
        MatchingEngine { book, ids }
    }

    /// Validate `order` and give it a fresh id.
    ///
    /// Validation runs first so a bad request never consumes an id. The
    /// entry is *not* added to the book.
    pub fn create_order(&self, order: &NewOrder) -> Result<OrderEntry, EngineError> {
        order.validate()?;
        let id = self.ids.next_id()?;
        OrderEntry::new(id, order)
    }

    /// Add an entry to the book as-is (seeding).
    pub fn add(&mut self, entry: OrderEntry) {
        self.book.add(entry);
    }

    /// One matching attempt for a pending order.
    ///
    /// In order:
    /// 1. If the order's own resting copy has been fulfilled by another
    ///    order's settlement, it is [`AttemptOutcome::Consumed`].
    /// 2. If the matcher finds a counterparty, settle against it. A
    ///    resting copy of `order` left over from an earlier miss is
    ///    fulfilled too, since the order is now used up.
    /// 3. Otherwise rest the order on the book if it is not there yet.
    pub fn attempt(&mut self, order: &OrderEntry) -> Result<AttemptOutcome, EngineError> {
        let present = self.book.exists(order.id());

        if present && self.book.get_active(order.id()).is_none() {
            return Ok(AttemptOutcome::Consumed);
        }

        if let Some(matched_id) = find_match(&self.book, order) {
            if let Some(settlement) = settle(&mut self.book, &matched_id, order, self.ids.as_ref())? {
                if present {
                    self.book.fulfill(order.id());
                }
                return Ok(AttemptOutcome::Matched(settlement));
            }
        }

        if !present {
            self.book.add(order.clone());
        }
        Ok(AttemptOutcome::Resting { inserted: !present })
    }

    /// Withdraw a pending order that stopped retrying.
    ///
    /// A fulfilled resting copy means the order was matched before the
    /// withdrawal got here: it is kept for the record and reported as
    /// [`Withdrawal::Consumed`]. Otherwise every copy is removed.
    pub fn withdraw(&mut self, id: &OrderId) -> Withdrawal {
        if self.book.exists(id) && self.book.get_active(id).is_none() {
            return Withdrawal::Consumed;
        }
        Withdrawal::Removed(self.book.cancel(id))
    }

    /// Hard-remove an order; returns how many entries were dropped.
    pub fn cancel(&mut self, id: &OrderId) -> usize {
        self.book.cancel(id)
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn into_book(self) -> OrderBook {
        self.book
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        MatchingEngine::new()
    }
}

impl fmt::Debug for MatchingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchingEngine")
            .field("book", &self.book)
            .finish_non_exhaustive()
    }
}
