// crates/engine-core/tests/order_book.rs
use std::time::Duration;

use engine_core::order_book::EMPTY_BOOK_MESSAGE;
use engine_core::{NewOrder, OrderBook, OrderEntry, OrderId, Side};

fn entry(id: &str, volume: i64, side: Side, price: f64) -> OrderEntry {
    OrderEntry::new(OrderId::new(id), &NewOrder::new(volume, side, price, Duration::ZERO))
        .expect("valid entry")
}

fn mixed_book() -> OrderBook {
    let mut book = OrderBook::new();
    book.add(entry("b1", 100, Side::Bid, 10.0));
    book.add(entry("a1", 50, Side::Ask, 20.0));
    book.add(entry("b2", 50, Side::Bid, 20.0));
    book.add(entry("a2", 50, Side::Ask, 40.0));
    book
}

#[test]
fn add_then_exists() {
    let mut book = OrderBook::new();
    let e = entry("x", 10, Side::Bid, 5.0);
    assert!(!book.exists(e.id()));

    book.add(e.clone());
    assert!(book.exists(e.id()));
    assert_eq!(book.len(), 1);
}

#[test]
fn cancel_removes_every_copy_and_keeps_order() {
    let mut book = mixed_book();
    book.add(entry("a1", 50, Side::Ask, 20.0));
    assert_eq!(book.len(), 5);

    let removed = book.cancel(&OrderId::new("a1"));
    assert_eq!(removed, 2);
    assert_eq!(book.len(), 3);
    assert!(!book.exists(&OrderId::new("a1")));

    let ids: Vec<&str> = book.entries().iter().map(|e| e.id().as_str()).collect();
    assert_eq!(ids, vec!["b1", "b2", "a2"]);
}

#[test]
fn cancel_unknown_is_noop() {
    let mut book = mixed_book();
    assert_eq!(book.cancel(&OrderId::new("missing")), 0);
    assert_eq!(book.len(), 4);
}

#[test]
fn fulfill_soft_deletes() {
    let mut book = mixed_book();
    let id = OrderId::new("a1");

    assert_eq!(book.fulfill(&id), 1);
    assert_eq!(book.len(), 4, "fulfilled entries stay in the book");
    assert!(book.exists(&id));
    assert!(book.get_active(&id).is_none());
    assert!(book.filter(Side::Ask).iter().all(|e| e.id() != &id));

    // Second fulfill changes nothing; status never reverts.
    assert_eq!(book.fulfill(&id), 0);
    assert!(book.entries().iter().filter(|e| e.id() == &id).all(|e| e.is_fulfilled()));
}

#[test]
fn fulfill_marks_duplicates_too() {
    let mut book = mixed_book();
    book.add(entry("b1", 5, Side::Bid, 1.0));

    assert_eq!(book.fulfill(&OrderId::new("b1")), 2);
    assert_eq!(book.active_len(), 3);
}

#[test]
fn fulfill_unknown_is_noop() {
    let mut book = mixed_book();
    assert_eq!(book.fulfill(&OrderId::new("nope")), 0);
    assert_eq!(book.active_len(), 4);
}

#[test]
fn filter_returns_exactly_active_entries_of_side() {
    let mut book = mixed_book();
    book.fulfill(&OrderId::new("b2"));

    let bids: Vec<&str> = book.filter(Side::Bid).iter().map(|e| e.id().as_str()).collect();
    let asks: Vec<&str> = book.filter(Side::Ask).iter().map(|e| e.id().as_str()).collect();

    assert_eq!(bids, vec!["b1"]);
    assert_eq!(asks, vec!["a1", "a2"]);
    assert!(book.filter(Side::Bid).iter().all(|e| e.side() == Side::Bid && !e.is_fulfilled()));
    assert_eq!(book.len(), 4, "filter does not mutate");
}

#[test]
fn view_lists_active_entries_only() {
    let mut book = mixed_book();
    book.fulfill(&OrderId::new("a2"));

    let view = book.view();
    assert!(view.contains("Order ID"));
    assert!(view.contains("| b1 "));
    assert!(view.contains("| Ask   |  20.000000 |         50 |"));
    assert!(!view.contains("| a2 "));
}

#[test]
fn view_of_empty_book() {
    assert_eq!(OrderBook::new().view().trim_end(), EMPTY_BOOK_MESSAGE);

    // Only fulfilled entries: still a table, just no rows.
    let mut book = OrderBook::new();
    book.add(entry("z", 1, Side::Bid, 1.0));
    book.fulfill(&OrderId::new("z"));
    let view = book.view();
    assert!(view.contains("Order ID"));
    assert!(!view.contains("| z "));
}
