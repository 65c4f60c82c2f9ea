//! Balance use/cancel processing and transaction lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use teller_core::{
    rules, AccountError, AccountNumber, Result, Transaction, TransactionId, TransactionResult,
    TransactionType, UserId,
};
use teller_store::Store;

/// Projection of a transaction record.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDto {
    /// The account the transaction was attempted against.
    pub account_number: AccountNumber,
    /// Use or cancel.
    pub transaction_type: TransactionType,
    /// Success or fail.
    pub result: TransactionResult,
    /// The amount involved.
    pub amount: i64,
    /// Balance at recording time.
    pub balance_snapshot: i64,
    /// The transaction id.
    pub transaction_id: TransactionId,
    /// When the attempt occurred.
    pub transacted_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionDto {
    fn from(tx: &Transaction) -> Self {
        Self {
            account_number: tx.account_number.clone(),
            transaction_type: tx.transaction_type,
            result: tx.result,
            amount: tx.amount,
            balance_snapshot: tx.balance_snapshot,
            transaction_id: tx.transaction_id,
            transacted_at: tx.transacted_at,
        }
    }
}

/// Applies balance-use and balance-cancel operations against accounts.
///
/// Every successful mutation lands together with its transaction record
/// in one atomic store write; every validation failure leaves storage
/// untouched. The `record_failed_*` entry points let callers durably log
/// a failure decided outside this service without touching balances.
pub struct TransactionService<S> {
    store: Arc<S>,
}

impl<S: Store> TransactionService<S> {
    /// Create a transaction processor over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Debit `amount` from the account and record a SUCCESS/USE
    /// transaction with the post-debit balance snapshot.
    ///
    /// # Errors
    ///
    /// `UserNotFound` / `AccountNotFound` on lookup, then the use rules:
    /// `OwnerMismatch`, `AccountClosed`, `InsufficientBalance`.
    pub fn use_balance(
        &self,
        user_id: UserId,
        account_number: &AccountNumber,
        amount: i64,
    ) -> Result<TransactionDto> {
        let user = self
            .store
            .get_user(&user_id)?
            .ok_or(AccountError::UserNotFound {
                user_id: user_id.get(),
            })?;
        let mut account =
            self.store
                .get_account(account_number)?
                .ok_or_else(|| AccountError::AccountNotFound {
                    account_number: account_number.to_string(),
                })?;

        rules::validate_use_balance(&user, &account, amount)?;

        account.use_balance(amount)?;
        let tx = Transaction::record(
            TransactionType::Use,
            TransactionResult::Success,
            &account,
            amount,
            Utc::now(),
        );
        self.store.apply_transaction(&account, &tx)?;

        tracing::info!(
            account_number = %tx.account_number,
            transaction_id = %tx.transaction_id,
            amount,
            balance = account.balance,
            "balance used"
        );

        Ok(TransactionDto::from(&tx))
    }

    /// Record a FAIL/USE transaction without touching the balance.
    ///
    /// Invoked by callers when a step outside this service fails after
    /// the use was requested; no ownership/status/amount revalidation.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if the account does not exist.
    pub fn record_failed_use(
        &self,
        account_number: &AccountNumber,
        amount: i64,
    ) -> Result<TransactionDto> {
        self.record_failure(TransactionType::Use, account_number, amount)
    }

    /// Credit `amount` back to the account, reversing the original
    /// transaction, and record a SUCCESS/CANCEL with the post-credit
    /// balance snapshot.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound` / `AccountNotFound` on lookup, then the
    /// cancel rules: `TransactionAccountMismatch`,
    /// `PartialCancelNotAllowed`, `CancelWindowExpired`.
    pub fn cancel_balance(
        &self,
        transaction_id: &TransactionId,
        account_number: &AccountNumber,
        amount: i64,
    ) -> Result<TransactionDto> {
        let original =
            self.store
                .get_transaction(transaction_id)?
                .ok_or_else(|| AccountError::TransactionNotFound {
                    transaction_id: transaction_id.to_string(),
                })?;
        let mut account =
            self.store
                .get_account(account_number)?
                .ok_or_else(|| AccountError::AccountNotFound {
                    account_number: account_number.to_string(),
                })?;

        rules::validate_cancel_balance(&original, &account, amount, Utc::now())?;

        account.cancel_balance(amount);
        let tx = Transaction::record(
            TransactionType::Cancel,
            TransactionResult::Success,
            &account,
            amount,
            Utc::now(),
        );
        self.store.apply_transaction(&account, &tx)?;

        tracing::info!(
            account_number = %tx.account_number,
            transaction_id = %tx.transaction_id,
            cancelled = %original.transaction_id,
            amount,
            balance = account.balance,
            "balance use cancelled"
        );

        Ok(TransactionDto::from(&tx))
    }

    /// Record a FAIL/CANCEL transaction without touching the balance.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if the account does not exist.
    pub fn record_failed_cancel(
        &self,
        account_number: &AccountNumber,
        amount: i64,
    ) -> Result<TransactionDto> {
        self.record_failure(TransactionType::Cancel, account_number, amount)
    }

    /// Look up a transaction by id.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound` if it does not exist.
    pub fn query_transaction(&self, transaction_id: &TransactionId) -> Result<TransactionDto> {
        let tx = self
            .store
            .get_transaction(transaction_id)?
            .ok_or_else(|| AccountError::TransactionNotFound {
                transaction_id: transaction_id.to_string(),
            })?;
        Ok(TransactionDto::from(&tx))
    }

    fn record_failure(
        &self,
        transaction_type: TransactionType,
        account_number: &AccountNumber,
        amount: i64,
    ) -> Result<TransactionDto> {
        let account =
            self.store
                .get_account(account_number)?
                .ok_or_else(|| AccountError::AccountNotFound {
                    account_number: account_number.to_string(),
                })?;

        // Snapshot is the current, unchanged balance.
        let tx = Transaction::record(
            transaction_type,
            TransactionResult::Fail,
            &account,
            amount,
            Utc::now(),
        );
        self.store.put_transaction(&tx)?;

        tracing::warn!(
            account_number = %tx.account_number,
            transaction_id = %tx.transaction_id,
            ?transaction_type,
            amount,
            "failed transaction recorded"
        );

        Ok(TransactionDto::from(&tx))
    }
}
