//! Transaction records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::ids::{AccountNumber, TransactionId};

/// An immutable record of one balance-affecting attempt.
///
/// Every attempted use or cancel produces exactly one record, successful
/// or not. Records reference their account by number and are never
/// mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Globally unique transaction id.
    pub transaction_id: TransactionId,

    /// The account this transaction was attempted against.
    pub account_number: AccountNumber,

    /// Whether this was a balance use or a cancel.
    pub transaction_type: TransactionType,

    /// Whether the attempt succeeded.
    pub result: TransactionResult,

    /// The amount involved.
    pub amount: i64,

    /// Account balance at recording time: after the mutation on success,
    /// the unchanged balance on failure.
    pub balance_snapshot: i64,

    /// When the attempt occurred.
    pub transacted_at: DateTime<Utc>,
}

impl Transaction {
    /// Record an attempt against `account` with a freshly generated id.
    ///
    /// The balance snapshot is taken from the account as passed in, so
    /// callers mutate the balance first for successful attempts and pass
    /// the untouched account for failed ones.
    #[must_use]
    pub fn record(
        transaction_type: TransactionType,
        result: TransactionResult,
        account: &Account,
        amount: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id: TransactionId::generate(),
            account_number: account.account_number.clone(),
            transaction_type,
            result,
            amount,
            balance_snapshot: account.balance,
            transacted_at: now,
        }
    }
}

/// The kind of balance movement a transaction represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// A debit against the account balance.
    Use,

    /// A credit reversing an earlier use.
    Cancel,
}

/// The outcome of a transaction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionResult {
    /// The attempt succeeded and the balance was mutated.
    Success,

    /// The attempt failed; the balance was left untouched.
    Fail,
}
