// crates/engine-exchange/tests/batch.rs
use std::time::Duration;

use engine_core::{MatchingEngine, NewOrder, OrderId, SequentialIdGenerator, Side};
use engine_exchange::seed::{sample_batch, seed_book, SAMPLE_BATCH, SEED_ORDERS};
use engine_exchange::{run_exchange, withdraw_orders, BookHandle, ExecutionMode, RetryOutcome};
use engine_protocol::format_book;

const POLL: Duration = Duration::from_millis(500);

fn spawn() -> BookHandle {
    BookHandle::spawn(MatchingEngine::with_generator(Box::new(SequentialIdGenerator::new("o")))).0
}

#[tokio::test(start_paused = true)]
async fn sample_program_sequential() {
    let book = spawn();
    assert_eq!(seed_book(&book).await.unwrap(), SEED_ORDERS.len());

    // Seed ids are o-1..o-10; batch ids o-11..o-14.
    let orders = sample_batch(&book).await.unwrap();
    assert_eq!(orders.len(), SAMPLE_BATCH.len());
    assert_eq!(book.snapshot().await.unwrap().len(), 10, "batch orders are not pre-added");

    let results = run_exchange(&book, orders, ExecutionMode::Sequential, POLL).await;
    let outcomes: Vec<RetryOutcome> = results.into_iter().map(Result::unwrap).collect();

    // Bid 50@20 takes Ask 50@20 exactly.
    match &outcomes[0] {
        RetryOutcome::Matched { settlement: Some(s), .. } => {
            assert_eq!(s.matched_id.as_str(), "o-5");
            assert!(s.residual.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }

    // Ask 50@20 takes the first inserted Bid at 20 (50@20).
    match &outcomes[1] {
        RetryOutcome::Matched { settlement: Some(s), .. } => {
            assert_eq!(s.matched_id.as_str(), "o-2");
            assert!(s.residual.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }

    // Bid 20@40 takes Ask 50@40, leaving 30 on the ask side.
    match &outcomes[2] {
        RetryOutcome::Matched { settlement: Some(s), .. } => {
            assert_eq!(s.matched_id.as_str(), "o-6");
            let residual = s.residual.as_ref().unwrap();
            assert_eq!((residual.side(), residual.volume(), residual.price()), (Side::Ask, 30, 40.0));
        }
        other => panic!("unexpected {:?}", other),
    }

    // Bid 100@30: every ask is above 30, so it rests and expires.
    assert!(matches!(outcomes[3], RetryOutcome::Expired { removed: 1, .. }));

    let final_book = book.snapshot().await.unwrap();
    assert_eq!(final_book.len(), 11);
    assert_eq!(final_book.active_len(), 8);
    assert!(!final_book.exists(&OrderId::new("o-14")));

    let records = format_book(&final_book);
    assert_eq!(records.lines().count(), 11);
    assert_eq!(records.lines().filter(|l| l.ends_with("|true")).count(), 3);
}

#[tokio::test(start_paused = true)]
async fn interrupted_batch_withdraws_resting_orders() {
    let book = spawn();
    seed_book(&book).await.unwrap();
    let orders = sample_batch(&book).await.unwrap();
    let ids: Vec<OrderId> = orders.iter().map(|o| o.id().clone()).collect();

    // The first three settle immediately; Bid 100@30 (10s expiry) is
    // still resting when the batch is cut short.
    let run = run_exchange(&book, orders, ExecutionMode::Sequential, POLL);
    assert!(tokio::time::timeout(Duration::from_secs(2), run).await.is_err());
    assert!(book.snapshot().await.unwrap().get_active(&OrderId::new("o-14")).is_some());

    assert_eq!(withdraw_orders(&book, &ids).await.unwrap(), 1);

    let final_book = book.snapshot().await.unwrap();
    assert!(!final_book.exists(&OrderId::new("o-14")));
    assert_eq!(final_book.len(), 11);
    assert_eq!(final_book.active_len(), 8);
    assert_eq!(format_book(&final_book).lines().filter(|l| l.ends_with("|true")).count(), 3);
}

#[tokio::test(start_paused = true)]
async fn concurrent_loops_settle_each_other() {
    let book = spawn();
    let bid = book
        .create_order(NewOrder::new(50, Side::Bid, 20.0, Duration::from_secs(5)))
        .await
        .unwrap();
    let ask = book
        .create_order(NewOrder::new(50, Side::Ask, 20.0, Duration::from_secs(5)))
        .await
        .unwrap();

    let results = run_exchange(&book, vec![bid, ask], ExecutionMode::Concurrent, POLL).await;
    let outcomes: Vec<RetryOutcome> = results.into_iter().map(Result::unwrap).collect();

    // Whichever loop reached the book first rested and was then consumed.
    assert!(outcomes.iter().all(RetryOutcome::is_matched));
    let settled = outcomes
        .iter()
        .filter(|o| matches!(o, RetryOutcome::Matched { settlement: Some(_), .. }))
        .count();
    assert_eq!(settled, 1);

    let final_book = book.snapshot().await.unwrap();
    assert_eq!(final_book.active_len(), 0);
    assert_eq!(final_book.len(), 1, "only the resting side was ever on the book");
}

#[tokio::test(start_paused = true)]
async fn concurrent_results_keep_input_order() {
    let book = spawn();
    seed_book(&book).await.unwrap();

    let far = book
        .create_order(NewOrder::new(10, Side::Bid, 1.0, Duration::from_secs(3)))
        .await
        .unwrap();
    let near = book
        .create_order(NewOrder::new(10, Side::Bid, 70.0, Duration::from_secs(3)))
        .await
        .unwrap();
    let far_id = far.id().clone();
    let near_id = near.id().clone();

    let results = run_exchange(&book, vec![far, near], ExecutionMode::Concurrent, POLL).await;
    let outcomes: Vec<RetryOutcome> = results.into_iter().map(Result::unwrap).collect();

    assert_eq!(outcomes[0].order_id(), &far_id);
    assert!(!outcomes[0].is_matched());
    assert_eq!(outcomes[1].order_id(), &near_id);
    assert!(outcomes[1].is_matched());
}
