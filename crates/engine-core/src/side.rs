//! Side (Bid / Ask) for order entries.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Order side: Bid (buy) or Ask (sell).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// The side an entry of this side trades against.
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Display label used in the book table and snapshot records.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Bid => "Bid",
            Side::Ask => "Ask",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width specifiers in the table layout apply.
        f.pad(self.as_str())
    }
}

/// Parse `"bid"` / `"ask"` in any letter case.
impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("bid") {
            Ok(Side::Bid)
        } else if trimmed.eq_ignore_ascii_case("ask") {
            Ok(Side::Ask)
        } else {
            Err(EngineError::InvalidSide(s.to_string()))
        }
    }
}
