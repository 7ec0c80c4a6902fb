//! Single order book: an insertion-ordered list of entries.
//!
//! Unlike a price-level book, entries are kept in one `Vec` in arrival
//! order. Order matters only for display and for tie-breaking inside the
//! matcher; lookups by id are linear scans.
//!
//! Mutation protocol:
//! - [`OrderBook::add`] appends.
//! - [`OrderBook::cancel`] hard-removes every entry with the id.
//! - [`OrderBook::fulfill`] soft-deletes every entry with the id.
//!
//! Nothing else changes an entry once it is in the book.

use crate::id::OrderId;
use crate::order::OrderEntry;
use crate::side::Side;

const RULE: &str =
    " ---------------------------------------------------------------------------- ";
const HEADER_RULE: &str =
    "|------------------------------------------+-------+------------+------------|";

/// Message rendered by [`OrderBook::view`] for a book without any entries.
pub const EMPTY_BOOK_MESSAGE: &str = "No entries on the OrderBook available";

#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    entries: Vec<OrderEntry>,
}

impl OrderBook {
    /// Create an empty order book.
    pub fn new() -> Self {
        OrderBook::default()
    }

    /// Append an entry. No uniqueness check; callers avoid duplicates.
    pub fn add(&mut self, entry: OrderEntry) {
        self.entries.push(entry);
    }

    /// Remove every entry carrying `id`, keeping the rest in order.
    ///
    /// Returns how many entries were removed (0 for an unknown id).
    pub fn cancel(&mut self, id: &OrderId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        before - self.entries.len()
    }

    /// Mark every entry carrying `id` as fulfilled.
    ///
    /// Returns how many entries changed state; already-fulfilled entries
    /// and unknown ids are no-ops.
    pub fn fulfill(&mut self, id: &OrderId) -> usize {
        self.entries
            .iter_mut()
            .filter(|e| e.id() == id)
            .map(|e| e.mark_fulfilled())
            .filter(|changed| *changed)
            .count()
    }

    /// True if any entry, fulfilled or not, carries `id`.
    pub fn exists(&self, id: &OrderId) -> bool {
        self.entries.iter().any(|e| e.id() == id)
    }

    /// Active entries on `side`, in insertion order.
    pub fn filter(&self, side: Side) -> Vec<&OrderEntry> {
        self.active().filter(|e| e.side() == side).collect()
    }

    /// First active entry carrying `id`.
    pub fn get_active(&self, id: &OrderId) -> Option<&OrderEntry> {
        self.active().find(|e| e.id() == id)
    }

    /// All entries, fulfilled included, in insertion order.
    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries still eligible for matching.
    pub fn active_len(&self) -> usize {
        self.active().count()
    }

    /// Render active entries as a text table (ID, Type, Price, Volume).
    ///
    /// A book holding no entries at all renders [`EMPTY_BOOK_MESSAGE`];
    /// a book holding only fulfilled entries renders an empty table.
    pub fn view(&self) -> String {
        if self.entries.is_empty() {
            return format!("{}\n", EMPTY_BOOK_MESSAGE);
        }

        let mut out = String::new();
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!(
            "| {:<40} | {:<5} | {:<10} | {:<10} |\n",
            "Order ID", "Type", "Price", "Volume"
        ));
        out.push_str(HEADER_RULE);
        out.push('\n');
        for entry in self.active() {
            out.push_str(&format!(
                "| {:<40} | {:<5} | {:>10.6} | {:>10} |\n",
                entry.id(),
                entry.side(),
                entry.price(),
                entry.volume()
            ));
        }
        out.push_str(RULE);
        out.push('\n');
        out
    }

    fn active(&self) -> impl Iterator<Item = &OrderEntry> {
        self.entries.iter().filter(|e| !e.is_fulfilled())
    }
}
