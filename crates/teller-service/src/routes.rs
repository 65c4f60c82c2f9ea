//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{accounts, health, transactions};
use crate::state::AppState;

/// Maximum concurrent requests for balance-affecting endpoints.
const TRANSACTION_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent requests for account lifecycle endpoints.
const ACCOUNT_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Accounts
/// - `POST /account` - Open an account
/// - `GET /account?user_id=N` - List a user's accounts
/// - `DELETE /account` - Close an account
///
/// ## Transactions (concurrency limited)
/// - `POST /transaction/use` - Debit a balance
/// - `POST /transaction/cancel` - Reverse an earlier debit
/// - `GET /transaction/{transaction_id}` - Query a transaction
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let state = Arc::new(state);

    let transaction_routes = Router::new()
        .route("/use", post(transactions::use_balance))
        .route("/cancel", post(transactions::cancel_balance))
        .route("/:transaction_id", get(transactions::query_transaction))
        .layer(ConcurrencyLimitLayer::new(
            TRANSACTION_MAX_CONCURRENT_REQUESTS,
        ));

    let account_routes = Router::new()
        .route(
            "/account",
            post(accounts::create_account)
                .get(accounts::list_accounts)
                .delete(accounts::close_account),
        )
        .layer(ConcurrencyLimitLayer::new(ACCOUNT_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/health", get(health::health))
        .merge(account_routes)
        .nest("/transaction", transaction_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
