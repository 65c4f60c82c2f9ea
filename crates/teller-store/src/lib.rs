//! Storage layer for the teller service.
//!
//! This crate provides the repository abstraction the domain operations
//! are written against, plus two implementations:
//!
//! - [`RocksStore`]: persistent storage over `RocksDB` column families
//!   (behind the default `rocksdb-backend` feature)
//! - [`MemoryStore`]: an in-process store for unit tests and stubs
//!
//! # Column families
//!
//! - `users`: user records, keyed by `user_id`
//! - `accounts`: account records, keyed by `account_number`
//! - `accounts_by_user`: index for listing/counting a user's accounts
//! - `transactions`: transaction records, keyed by `transaction_id`
//!
//! # Unit of work
//!
//! Each domain operation performs all reads and validation up front and
//! then commits its writes through a single call — either a plain `put`
//! or [`Store::apply_transaction`], which persists the mutated account
//! and the new transaction record in one atomic batch. An error exit
//! before that call therefore leaves storage untouched. There is no
//! additional concurrency scheme beyond this write boundary; a deployment
//! expecting same-account write races would add row versioning here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
#[cfg(feature = "rocksdb-backend")]
pub mod keys;
pub mod mem;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

pub use error::{Result, StoreError};
pub use mem::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use teller_core::{Account, AccountNumber, AccountUser, Transaction, TransactionId, UserId};

/// The storage trait defining all database operations.
///
/// This is the collaborator interface consumed by the domain services;
/// it abstracts over the concrete backend.
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert or update a user record.
    ///
    /// Users are managed outside this system; this exists for seeding.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_user(&self, user: &AccountUser) -> Result<()>;

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &UserId) -> Result<Option<AccountUser>>;

    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Insert or update an account record.
    ///
    /// This also maintains the per-user index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_account(&self, account: &Account) -> Result<()>;

    /// Get an account by its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, account_number: &AccountNumber) -> Result<Option<Account>>;

    /// List all accounts belonging to a user, any status, in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_accounts_by_user(&self, user_id: &UserId) -> Result<Vec<Account>>;

    /// Count all accounts belonging to a user, any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_accounts_by_user(&self, user_id: &UserId) -> Result<usize>;

    /// Whether an account with this number already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn account_number_exists(&self, account_number: &AccountNumber) -> Result<bool>;

    // =========================================================================
    // Transaction Operations
    // =========================================================================

    /// Insert a transaction record (insert-only; records are immutable).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Get a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_transaction(&self, transaction_id: &TransactionId) -> Result<Option<Transaction>>;

    // =========================================================================
    // Compound Operations
    // =========================================================================

    /// Persist a mutated account and its transaction record atomically.
    ///
    /// This is the unit-of-work boundary for balance-affecting
    /// operations: both writes land or neither does.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails; on error nothing
    /// has been written.
    fn apply_transaction(&self, account: &Account, transaction: &Transaction) -> Result<()>;
}
