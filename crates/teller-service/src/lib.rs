//! Teller HTTP API service.
//!
//! This crate provides the back-office operations of the teller system
//! and the HTTP API on top of them:
//!
//! - Account lifecycle: open, list, close
//! - Balance transactions: use, cancel, failure records, lookup
//!
//! The domain services in [`services`] are the operation surface; the
//! handlers in [`handlers`] are a thin JSON layer over them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use services::{AccountNumberGenerator, AccountService, TransactionService};
pub use state::AppState;
