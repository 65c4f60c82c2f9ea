//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in
//! column families.

use teller_core::{AccountNumber, TransactionId, UserId, ACCOUNT_NUMBER_LEN};

/// Width of an encoded user id in bytes.
const USER_ID_LEN: usize = 8;

/// Create a user key from a user id (big-endian, so keys sort numerically).
#[must_use]
pub fn user_key(user_id: &UserId) -> [u8; USER_ID_LEN] {
    user_id.get().to_be_bytes()
}

/// Create an account key from an account number.
#[must_use]
pub fn account_key(account_number: &AccountNumber) -> Vec<u8> {
    account_number.as_ref().to_vec()
}

/// Create a user-account index key.
///
/// Format: `user_id (8 bytes BE) || account_number (10 bytes)`.
#[must_use]
pub fn user_account_key(user_id: &UserId, account_number: &AccountNumber) -> Vec<u8> {
    let mut key = Vec::with_capacity(USER_ID_LEN + ACCOUNT_NUMBER_LEN);
    key.extend_from_slice(&user_key(user_id));
    key.extend_from_slice(account_number.as_ref());
    key
}

/// Create a prefix for iterating all accounts of a user.
#[must_use]
pub fn user_accounts_prefix(user_id: &UserId) -> Vec<u8> {
    user_key(user_id).to_vec()
}

/// Extract the account number from a user-account index key.
///
/// # Panics
///
/// Panics if the key is not `user_id || account_number` shaped; index
/// keys are only ever written by [`user_account_key`].
#[must_use]
pub fn extract_account_number_from_user_key(key: &[u8]) -> AccountNumber {
    let digits = std::str::from_utf8(&key[USER_ID_LEN..USER_ID_LEN + ACCOUNT_NUMBER_LEN])
        .expect("account number bytes are ASCII digits");
    digits.parse().expect("valid account number in index key")
}

/// Create a transaction key from a transaction id.
#[must_use]
pub fn transaction_key(transaction_id: &TransactionId) -> Vec<u8> {
    transaction_id.as_bytes().to_vec()
}
