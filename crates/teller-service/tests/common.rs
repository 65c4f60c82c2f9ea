//! Common test utilities for teller integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use teller_core::{AccountUser, UserId};
use teller_service::{create_router, AppState, ServiceConfig};
use teller_store::{RocksStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct store access for seeding and inspection.
    pub store: Arc<RocksStore>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Seed a user directly into storage (user registration is outside
    /// the service's API).
    pub fn seed_user(&self, user_id: i64, username: &str) {
        self.store
            .put_user(&AccountUser::new(UserId::new(user_id), username))
            .expect("Failed to seed user");
    }

    /// Open an account through the API and return its number.
    pub async fn create_account(&self, user_id: i64, initial_balance: i64) -> String {
        let response = self
            .server
            .post("/account")
            .json(&serde_json::json!({
                "user_id": user_id,
                "initial_balance": initial_balance,
            }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["account_number"]
            .as_str()
            .expect("account_number in response")
            .to_string()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
