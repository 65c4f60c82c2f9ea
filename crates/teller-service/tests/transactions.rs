//! Balance use/cancel integration tests.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Months, Utc};
use common::TestHarness;
use serde_json::json;

use teller_core::{Transaction, TransactionResult, TransactionType};
use teller_store::Store;

// ============================================================================
// Use Balance
// ============================================================================

#[tokio::test]
async fn use_balance_success() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 10_000).await;

    let response = harness
        .server
        .post("/transaction/use")
        .json(&json!({ "user_id": 1, "account_number": number, "amount": 3000 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["account_number"], number);
    assert_eq!(body["transaction_result"], "SUCCESS");
    assert_eq!(body["amount"], 3000);
    let tx_id = body["transaction_id"].as_str().unwrap();
    assert_eq!(tx_id.len(), 32);

    // The stored record snapshots the post-debit balance.
    let stored = harness
        .store
        .get_transaction(&tx_id.parse().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.balance_snapshot, 7000);
    assert_eq!(stored.transaction_type, TransactionType::Use);

    let account = harness
        .store
        .get_account(&number.parse().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(account.balance, 7000);
}

#[tokio::test]
async fn use_balance_insufficient_fails_without_balance_change() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 1000).await;

    let response = harness
        .server
        .post("/transaction/use")
        .json(&json!({ "user_id": 1, "account_number": number, "amount": 2000 }))
        .await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "INSUFFICIENT_BALANCE");

    let account = harness
        .store
        .get_account(&number.parse().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(account.balance, 1000);
}

#[tokio::test]
async fn use_balance_against_closed_account_fails() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 0).await;
    harness
        .server
        .delete("/account")
        .json(&json!({ "user_id": 1, "account_number": number }))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .post("/transaction/use")
        .json(&json!({ "user_id": 1, "account_number": number, "amount": 100 }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "ACCOUNT_CLOSED");
}

#[tokio::test]
async fn use_balance_rejects_out_of_range_amounts() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 10_000).await;

    for amount in [9, 1_000_000_001i64] {
        let response = harness
            .server
            .post("/transaction/use")
            .json(&json!({ "user_id": 1, "account_number": number, "amount": amount }))
            .await;
        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn use_balance_rejects_malformed_account_number() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");

    let response = harness
        .server
        .post("/transaction/use")
        .json(&json!({ "user_id": 1, "account_number": "12345", "amount": 100 }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "INVALID_REQUEST");
}

// ============================================================================
// Cancel Balance
// ============================================================================

#[tokio::test]
async fn use_then_cancel_restores_balance() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 10_000).await;

    let response = harness
        .server
        .post("/transaction/use")
        .json(&json!({ "user_id": 1, "account_number": number, "amount": 4500 }))
        .await;
    response.assert_status_ok();
    let used: serde_json::Value = response.json();
    let tx_id = used["transaction_id"].as_str().unwrap();

    let response = harness
        .server
        .post("/transaction/cancel")
        .json(&json!({
            "transaction_id": tx_id,
            "account_number": number,
            "amount": 4500,
        }))
        .await;

    response.assert_status_ok();
    let cancelled: serde_json::Value = response.json();
    assert_eq!(cancelled["transaction_result"], "SUCCESS");
    assert_ne!(cancelled["transaction_id"], used["transaction_id"]);

    let account = harness
        .store
        .get_account(&number.parse().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(account.balance, 10_000);
}

#[tokio::test]
async fn cancel_with_wrong_amount_fails_either_direction() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 10_000).await;

    let response = harness
        .server
        .post("/transaction/use")
        .json(&json!({ "user_id": 1, "account_number": number, "amount": 3000 }))
        .await;
    let tx_id = response.json::<serde_json::Value>()["transaction_id"]
        .as_str()
        .unwrap()
        .to_string();

    for amount in [2999, 3001] {
        let response = harness
            .server
            .post("/transaction/cancel")
            .json(&json!({
                "transaction_id": tx_id,
                "account_number": number,
                "amount": amount,
            }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error_code"], "PARTIAL_CANCEL_NOT_ALLOWED");
    }
}

#[tokio::test]
async fn cancel_after_a_year_fails() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 10_000).await;

    // Plant an old successful use directly in storage.
    let account = harness
        .store
        .get_account(&number.parse().unwrap())
        .unwrap()
        .unwrap();
    let mut old = Transaction::record(
        TransactionType::Use,
        TransactionResult::Success,
        &account,
        3000,
        Utc::now(),
    );
    old.transacted_at = Utc::now() - Months::new(12) - Duration::days(1);
    harness.store.put_transaction(&old).unwrap();

    let response = harness
        .server
        .post("/transaction/cancel")
        .json(&json!({
            "transaction_id": old.transaction_id.to_string(),
            "account_number": number,
            "amount": 3000,
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "CANCEL_WINDOW_EXPIRED");
}

#[tokio::test]
async fn cancel_unknown_transaction_fails() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 1000).await;

    let response = harness
        .server
        .post("/transaction/cancel")
        .json(&json!({
            "transaction_id": "00000000000000000000000000000000",
            "account_number": number,
            "amount": 100,
        }))
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "TRANSACTION_NOT_FOUND");
}

// ============================================================================
// Query Transaction
// ============================================================================

#[tokio::test]
async fn query_transaction_returns_stored_projection() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 10_000).await;

    let response = harness
        .server
        .post("/transaction/use")
        .json(&json!({ "user_id": 1, "account_number": number, "amount": 500 }))
        .await;
    let tx_id = response.json::<serde_json::Value>()["transaction_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = harness.server.get(&format!("/transaction/{tx_id}")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["transaction_id"], tx_id);
    assert_eq!(body["transaction_type"], "USE");
    assert_eq!(body["transaction_result"], "SUCCESS");
    assert_eq!(body["amount"], 500);
    assert_eq!(body["account_number"], number);
}

#[tokio::test]
async fn query_unknown_transaction_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/transaction/ffffffffffffffffffffffffffffffff")
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "TRANSACTION_NOT_FOUND");
}

#[tokio::test]
async fn query_malformed_transaction_id_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/transaction/not-a-real-id").await;

    response.assert_status_bad_request();
}

// ============================================================================
// Failure Records
// ============================================================================

#[tokio::test]
async fn failed_use_leaves_a_fail_record() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    harness.seed_user(2, "mallory");
    let number = harness.create_account(1, 1000).await;

    // Owner mismatch: the use is rejected but a FAIL record is written
    // with the unchanged balance as snapshot.
    let response = harness
        .server
        .post("/transaction/use")
        .json(&json!({ "user_id": 2, "account_number": number, "amount": 100 }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let account = harness
        .store
        .get_account(&number.parse().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(account.balance, 1000);
}
