//! A single entry in the order book.
//!
//! Everything except the status is fixed at construction. Partial fills
//! never shrink an entry; settlement creates a *new* residual entry
//! instead, so `volume` is always the quantity the entry was created with.

use std::time::Duration;

use crate::error::EngineError;
use crate::id::OrderId;
use crate::messages::NewOrder;
use crate::side::Side;

/// Lifecycle of an entry: `Active` until consumed by a match.
///
/// Fulfilled entries stay in the book for audit and snapshots but are
/// invisible to matching and display.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Active,
    Fulfilled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntry {
    id: OrderId,
    volume: i64,
    side: Side,
    price: f64,
    status: OrderStatus,
    expiry: Duration,
}

impl OrderEntry {
    /// Validating constructor: rejects non-positive volume and
    /// non-finite or non-positive price.
    pub fn new(id: OrderId, order: &NewOrder) -> Result<Self, EngineError> {
        order.validate()?;
        Ok(OrderEntry {
            id,
            volume: order.volume,
            side: order.side,
            price: order.price,
            status: OrderStatus::Active,
            expiry: order.expiry,
        })
    }

    /// Leftover liquidity of `template` after a match: same side, price
    /// and expiry, fresh id, `volume` as given (caller guarantees `> 0`).
    pub(crate) fn residual_of(template: &OrderEntry, id: OrderId, volume: i64) -> Self {
        debug_assert!(volume > 0);
        OrderEntry {
            id,
            volume,
            side: template.side,
            price: template.price,
            status: OrderStatus::Active,
            expiry: template.expiry,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn volume(&self) -> i64 {
        self.volume
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_fulfilled(&self) -> bool {
        self.status == OrderStatus::Fulfilled
    }

    /// One-way transition to `Fulfilled`. Returns whether the status changed.
    pub(crate) fn mark_fulfilled(&mut self) -> bool {
        let changed = self.status == OrderStatus::Active;
        self.status = OrderStatus::Fulfilled;
        changed
    }
}
