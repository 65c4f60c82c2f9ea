//! Account entity and lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AccountError, Result};
use crate::ids::{AccountNumber, UserId};

/// A bank account: a single-currency ledger owned by one user.
///
/// The balance is an integer in the smallest currency unit and is never
/// negative; the only status transition is `InUse` to `Unregistered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The owning user.
    pub user_id: UserId,

    /// The unique 10-digit account number (natural key).
    pub account_number: AccountNumber,

    /// Current lifecycle status.
    pub status: AccountStatus,

    /// Current balance in the smallest currency unit.
    pub balance: i64,

    /// When the account was opened.
    pub registered_at: DateTime<Utc>,

    /// When the account was closed, if it has been.
    pub unregistered_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Open a new account in `InUse` status.
    #[must_use]
    pub fn open(
        user_id: UserId,
        account_number: AccountNumber,
        initial_balance: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            account_number,
            status: AccountStatus::InUse,
            balance: initial_balance,
            registered_at: now,
            unregistered_at: None,
        }
    }

    /// Debit the balance by `amount`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance` if the balance would go negative.
    pub fn use_balance(&mut self, amount: i64) -> Result<()> {
        if self.balance < amount {
            return Err(AccountError::InsufficientBalance {
                balance: self.balance,
                amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Credit the balance by `amount`, reversing an earlier debit.
    pub fn cancel_balance(&mut self, amount: i64) {
        self.balance += amount;
    }

    /// Close the account, stamping the closure time.
    pub fn unregister(&mut self, now: DateTime<Utc>) {
        self.status = AccountStatus::Unregistered;
        self.unregistered_at = Some(now);
    }

    /// Whether the account is still open for use.
    #[must_use]
    pub fn is_in_use(&self) -> bool {
        self.status == AccountStatus::InUse
    }
}

/// Lifecycle status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// The account is open and accepts transactions.
    InUse,

    /// The account has been closed; no further transactions.
    Unregistered,
}
