use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use swap::error::StateError;
use swap::form::{Side, SwapFormStore};
use swap::time::now_ms;
use swap::token::{MAINNET_CHAIN_ID, Token};
use swap::transaction::{TransactionRecord, TransactionStatus, TransactionStore};

fn usdc() -> Token {
    Token::contract(
        MAINNET_CHAIN_ID,
        "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        "USDC",
        6,
    )
}

fn filled_form() -> SwapFormStore {
    let form = SwapFormStore::default();
    form.set_token(Side::Output, Some(usdc()));
    form.set_value(Side::Input, Some(1.0));
    form.set_value(Side::Output, Some(1_800.0));
    form
}

fn record(receipt: &str, timestamp_ms: u64) -> TransactionRecord {
    TransactionRecord::submitted(&filled_form().form_state(), receipt, timestamp_ms).unwrap()
}

#[test]
fn starts_empty() {
    assert!(TransactionStore::new().get().is_none());
}

#[test]
fn set_replaces_slot() {
    let store = TransactionStore::new();
    store.set(record("0x01", 1));
    store.set(record("0x02", 2));

    let held = store.get().unwrap();
    assert_eq!(held.receipt, "0x02");
    assert_eq!(held.timestamp_ms, 2);
}

#[test]
fn clear_empties_slot() {
    let store = TransactionStore::new();
    store.set(record("0x01", 1));
    store.clear();
    assert!(store.get().is_none());
}

#[test]
fn settle_attaches_outcome_only() {
    let store = TransactionStore::new();
    let submitted = record("0x01", 1_000);
    store.set(submitted.clone());

    assert!(store.settle(TransactionStatus::Success, 4_500));

    let held = store.get().unwrap();
    assert_eq!(held.elapsed_ms, Some(3_500));
    assert_eq!(held.status, Some(TransactionStatus::Success));
    assert_eq!(held.input, submitted.input);
    assert_eq!(held.output, submitted.output);
    assert_eq!(held.receipt, submitted.receipt);
}

#[test]
fn settle_keeps_captured_failure() {
    let store = TransactionStore::new();
    store.set(record("0x01", now_ms()));

    assert!(store.settle_now(TransactionStatus::failed("execution reverted")));

    let status = store.get().unwrap().status.unwrap();
    assert!(!status.is_success());
    assert_eq!(
        status,
        TransactionStatus::Failed {
            reason: "execution reverted".into()
        }
    );
}

#[test]
fn settle_on_empty_slot_is_rejected_without_notifying() {
    let store = TransactionStore::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    let _sub = store.subscribe(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    assert!(!store.settle(TransactionStatus::Success, 10));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn settle_clamps_clock_skew() {
    let store = TransactionStore::new();
    store.set(record("0x01", 5_000));
    store.settle(TransactionStatus::Success, 4_000);
    assert_eq!(store.get().unwrap().elapsed_ms, Some(0));
}

#[test]
fn incomplete_form_cannot_be_recorded() {
    let form = SwapFormStore::default();
    form.set_value(Side::Input, Some(1.0));

    let err = TransactionRecord::submitted(&form.form_state(), "0x01", 0).unwrap_err();

    assert_eq!(
        err,
        StateError::IncompleteSide {
            side: Side::Output,
            missing: "token"
        }
    );
}
