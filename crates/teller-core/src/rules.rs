//! Shared validation rules.
//!
//! The invariant checks used by both the account lifecycle and the
//! transaction processor, isolated here so neither duplicates them. All
//! rules are pure: they evaluate already-fetched entities and never touch
//! storage. Within each operation the rules run in a fixed order and the
//! first failure short-circuits the rest.

use chrono::{DateTime, Months, Utc};

use crate::account::Account;
use crate::error::{AccountError, Result};
use crate::transaction::Transaction;
use crate::user::AccountUser;

/// Maximum number of accounts a single user may hold.
///
/// The count covers every account the store returns for the user,
/// closed ones included, matching the reference behavior.
pub const MAX_ACCOUNTS_PER_USER: usize = 10;

/// How long after the original transaction a cancel is still accepted.
pub const CANCEL_WINDOW_MONTHS: u32 = 12;

/// Check that a user may open another account.
///
/// # Errors
///
/// `MaxAccountsExceeded` when `count` has reached the cap.
pub fn validate_create_account(count: usize) -> Result<()> {
    if count >= MAX_ACCOUNTS_PER_USER {
        return Err(AccountError::MaxAccountsExceeded {
            count,
            max: MAX_ACCOUNTS_PER_USER,
        });
    }
    Ok(())
}

/// Check that `user` may close `account`.
///
/// # Errors
///
/// `OwnerMismatch`, then `AlreadyClosed`, then `BalanceNotEmpty`.
pub fn validate_close_account(user: &AccountUser, account: &Account) -> Result<()> {
    validate_owner(user, account)?;
    if !account.is_in_use() {
        return Err(AccountError::AlreadyClosed {
            account_number: account.account_number.to_string(),
        });
    }
    if account.balance > 0 {
        return Err(AccountError::BalanceNotEmpty {
            balance: account.balance,
        });
    }
    Ok(())
}

/// Check that `user` may use `amount` from `account`.
///
/// # Errors
///
/// `OwnerMismatch`, then `AccountClosed`, then `InsufficientBalance`.
pub fn validate_use_balance(user: &AccountUser, account: &Account, amount: i64) -> Result<()> {
    validate_owner(user, account)?;
    if !account.is_in_use() {
        return Err(AccountError::AccountClosed {
            account_number: account.account_number.to_string(),
        });
    }
    if account.balance < amount {
        return Err(AccountError::InsufficientBalance {
            balance: account.balance,
            amount,
        });
    }
    Ok(())
}

/// Check that `transaction` may be cancelled against `account` for `amount`.
///
/// # Errors
///
/// `TransactionAccountMismatch`, then `PartialCancelNotAllowed`, then
/// `CancelWindowExpired` when the original transaction is strictly older
/// than [`CANCEL_WINDOW_MONTHS`] before `now`.
pub fn validate_cancel_balance(
    transaction: &Transaction,
    account: &Account,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    if transaction.account_number != account.account_number {
        return Err(AccountError::TransactionAccountMismatch {
            expected: transaction.account_number.to_string(),
            actual: account.account_number.to_string(),
        });
    }
    if transaction.amount != amount {
        return Err(AccountError::PartialCancelNotAllowed {
            original: transaction.amount,
            requested: amount,
        });
    }
    let cutoff = now - Months::new(CANCEL_WINDOW_MONTHS);
    if transaction.transacted_at < cutoff {
        return Err(AccountError::CancelWindowExpired {
            transacted_at: transaction.transacted_at,
        });
    }
    Ok(())
}

fn validate_owner(user: &AccountUser, account: &Account) -> Result<()> {
    if user.id != account.user_id {
        return Err(AccountError::OwnerMismatch {
            user_id: user.id.get(),
            account_number: account.account_number.to_string(),
        });
    }
    Ok(())
}
