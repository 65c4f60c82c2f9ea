//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// User records, keyed by `user_id` (8 bytes big-endian).
    pub const USERS: &str = "users";

    /// Account records, keyed by the 10-digit `account_number`.
    pub const ACCOUNTS: &str = "accounts";

    /// Index: accounts by owner, keyed by `user_id || account_number`.
    /// Value is empty (index only).
    pub const ACCOUNTS_BY_USER: &str = "accounts_by_user";

    /// Transaction records, keyed by `transaction_id` (16 bytes).
    pub const TRANSACTIONS: &str = "transactions";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::USERS,
        cf::ACCOUNTS,
        cf::ACCOUNTS_BY_USER,
        cf::TRANSACTIONS,
    ]
}
