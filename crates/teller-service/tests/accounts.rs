//! Account lifecycle integration tests.

mod common;

use axum::http::StatusCode;

use common::TestHarness;
use serde_json::json;

// ============================================================================
// Account Creation
// ============================================================================

#[tokio::test]
async fn create_account_success() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");

    let response = harness
        .server
        .post("/account")
        .json(&json!({ "user_id": 1, "initial_balance": 5000 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"], 1);
    let number = body["account_number"].as_str().unwrap();
    assert_eq!(number.len(), 10);
    assert!(number.bytes().all(|b| b.is_ascii_digit()));
    assert!(body["registered_at"].is_string());
}

#[tokio::test]
async fn create_account_unknown_user_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/account")
        .json(&json!({ "user_id": 42, "initial_balance": 0 }))
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn create_account_rejects_bad_inputs() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");

    let response = harness
        .server
        .post("/account")
        .json(&json!({ "user_id": 0, "initial_balance": 100 }))
        .await;
    response.assert_status_bad_request();

    let response = harness
        .server
        .post("/account")
        .json(&json!({ "user_id": 1, "initial_balance": -1 }))
        .await;
    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn eleventh_account_fails_with_max_accounts() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");

    for _ in 0..10 {
        harness.create_account(1, 0).await;
    }

    let response = harness
        .server
        .post("/account")
        .json(&json!({ "user_id": 1, "initial_balance": 0 }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "MAX_ACCOUNTS_EXCEEDED");
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn list_accounts_returns_all_statuses() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");

    let first = harness.create_account(1, 0).await;
    harness.create_account(1, 700).await;

    // Close the first; it must still be listed.
    harness
        .server
        .delete("/account")
        .json(&json!({ "user_id": 1, "account_number": first }))
        .await
        .assert_status_ok();

    let response = harness.server.get("/account").add_query_param("user_id", 1).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_accounts_negative_user_id_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/account")
        .add_query_param("user_id", -3)
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "INVALID_USER_ID");
}

#[tokio::test]
async fn list_accounts_unknown_user_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/account")
        .add_query_param("user_id", 5)
        .await;

    response.assert_status_not_found();
}

// ============================================================================
// Closing
// ============================================================================

#[tokio::test]
async fn close_account_success() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 0).await;

    let response = harness
        .server
        .delete("/account")
        .json(&json!({ "user_id": 1, "account_number": number }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["account_number"], number);
    assert!(body["unregistered_at"].is_string());
}

#[tokio::test]
async fn close_account_with_balance_fails_and_stays_open() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    let number = harness.create_account(1, 250).await;

    let response = harness
        .server
        .delete("/account")
        .json(&json!({ "user_id": 1, "account_number": number }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "BALANCE_NOT_EMPTY");

    // Still usable: the status did not change.
    let response = harness
        .server
        .post("/transaction/use")
        .json(&json!({ "user_id": 1, "account_number": number, "amount": 250 }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn close_account_twice_fails() {
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
        .delete("/account")
        .json(&json!({ "user_id": 1, "account_number": number }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "ALREADY_CLOSED");
}

#[tokio::test]
async fn close_account_owner_mismatch_fails() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");
    harness.seed_user(2, "mallory");
    let number = harness.create_account(1, 0).await;

    let response = harness
        .server
        .delete("/account")
        .json(&json!({ "user_id": 2, "account_number": number }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "OWNER_MISMATCH");
}

#[tokio::test]
async fn close_unknown_account_fails() {
    let harness = TestHarness::new();
    harness.seed_user(1, "alice");

    let response = harness
        .server
        .delete("/account")
        .json(&json!({ "user_id": 1, "account_number": "0123456789" }))
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_code"], "ACCOUNT_NOT_FOUND");
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_endpoint_responds() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}
