//! Request / result types exchanged with the [`MatchingEngine`](crate::MatchingEngine).
//!
//! - [`NewOrder`]: what a caller submits (no id yet).
//! - [`AttemptOutcome`]: the result of one matching attempt for a
//!   pending order.
//! - [`Withdrawal`]: what withdrawing an expired or abandoned order did.

use std::time::Duration;

use crate::error::EngineError;
use crate::settlement::Settlement;
use crate::side::Side;

/// New order request (input).
///
/// Validated once, when it is turned into an [`OrderEntry`](crate::OrderEntry).
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Quantity; must be `> 0`.
    pub volume: i64,

    pub side: Side,

    /// Limit price; must be finite and `> 0`.
    pub price: f64,

    /// How long the exchange keeps retrying this order before withdrawing it.
    pub expiry: Duration,
}

impl NewOrder {
    pub fn new(volume: i64, side: Side, price: f64, expiry: Duration) -> Self {
        NewOrder {
            volume,
            side,
            price,
            expiry,
        }
    }

    /// Build from loosely-typed parts, e.g. `(50, "Bid", 20.0, 5)`.
    ///
    /// The side string is matched case-insensitively and `expiry_secs`
    /// is in whole seconds. Volume and price are checked as well so a
    /// malformed request never reaches the book.
    pub fn from_parts(
        volume: i64,
        side: &str,
        price: f64,
        expiry_secs: u64,
    ) -> Result<Self, EngineError> {
        let order = NewOrder::new(volume, side.parse()?, price, Duration::from_secs(expiry_secs));
        order.validate()?;
        Ok(order)
    }

    /// Check volume and price constraints.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.volume <= 0 {
            return Err(EngineError::InvalidVolume(self.volume));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(EngineError::InvalidPrice(self.price));
        }
        Ok(())
    }
}

/// Result of a single matching attempt for a pending order.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// The order crossed a resting entry and was settled against it.
    Matched(Settlement),

    /// The order's own resting copy was fulfilled by another order's
    /// settlement; nothing is left to match.
    Consumed,

    /// No eligible counterparty. `inserted` is true when this attempt
    /// placed the order on the book (first miss); later misses leave the
    /// book untouched.
    Resting { inserted: bool },
}

impl AttemptOutcome {
    /// True for outcomes that end the retry loop in the matched state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AttemptOutcome::Resting { .. })
    }
}

/// Result of withdrawing a pending order from the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Withdrawal {
    /// Every copy of the order was already fulfilled by a counterparty;
    /// the book is left untouched so the record survives.
    Consumed,

    /// The order was still live; this many entries were removed (zero if
    /// it never rested).
    Removed(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_validates() {
        let ok = NewOrder::from_parts(50, "bid", 20.0, 5).unwrap();
        assert_eq!(ok.side, Side::Bid);
        assert_eq!(ok.expiry, Duration::from_secs(5));

        assert!(matches!(
            NewOrder::from_parts(0, "Bid", 20.0, 0),
            Err(EngineError::InvalidVolume(0))
        ));
        assert!(matches!(
            NewOrder::from_parts(-5, "Ask", 20.0, 0),
            Err(EngineError::InvalidVolume(-5))
        ));
        assert!(matches!(
            NewOrder::from_parts(5, "Ask", f64::NAN, 0),
            Err(EngineError::InvalidPrice(_))
        ));
        assert!(matches!(
            NewOrder::from_parts(5, "Ask", -1.0, 0),
            Err(EngineError::InvalidPrice(_))
        ));
        assert!(matches!(
            NewOrder::from_parts(5, "", 10.0, 0),
            Err(EngineError::InvalidSide(_))
        ));
    }
}
