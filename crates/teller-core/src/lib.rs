//! Core types and rules for the teller back-office service.
//!
//! This crate provides the foundational pieces used throughout teller:
//!
//! - **Identifiers**: [`UserId`], [`AccountNumber`], [`TransactionId`]
//! - **Entities**: [`AccountUser`], [`Account`], [`Transaction`]
//! - **Validation rules**: the shared ownership/status/amount checks in
//!   [`rules`]
//! - **Errors**: [`AccountError`], one variant per domain failure
//!
//! Balances and amounts are `i64` values in the smallest currency unit;
//! no floating point anywhere.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod error;
pub mod ids;
pub mod rules;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountStatus};
pub use error::{AccountError, Result};
pub use ids::{AccountNumber, IdError, TransactionId, UserId, ACCOUNT_NUMBER_LEN};
pub use rules::{CANCEL_WINDOW_MONTHS, MAX_ACCOUNTS_PER_USER};
pub use transaction::{Transaction, TransactionResult, TransactionType};
pub use user::AccountUser;
