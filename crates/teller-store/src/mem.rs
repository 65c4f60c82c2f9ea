//! In-memory storage implementation.
//!
//! A `Mutex`-guarded map-backed store used by unit tests and as the
//! storage stub for the account-number generator property test. Holding
//! the lock for the whole of `apply_transaction` gives it the same
//! all-or-nothing write behavior as the batched `RocksDB` backend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use teller_core::{Account, AccountNumber, AccountUser, Transaction, TransactionId, UserId};

use crate::error::Result;
use crate::Store;

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, AccountUser>,
    accounts: BTreeMap<AccountNumber, Account>,
    transactions: BTreeMap<String, Transaction>,
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    fn put_user(&self, user: &AccountUser) -> Result<()> {
        self.lock().users.insert(user.id.get(), user.clone());
        Ok(())
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<AccountUser>> {
        Ok(self.lock().users.get(&user_id.get()).cloned())
    }

    fn put_account(&self, account: &Account) -> Result<()> {
        self.lock()
            .accounts
            .insert(account.account_number.clone(), account.clone());
        Ok(())
    }

    fn get_account(&self, account_number: &AccountNumber) -> Result<Option<Account>> {
        Ok(self.lock().accounts.get(account_number).cloned())
    }

    fn list_accounts_by_user(&self, user_id: &UserId) -> Result<Vec<Account>> {
        Ok(self
            .lock()
            .accounts
            .values()
            .filter(|account| account.user_id == *user_id)
            .cloned()
            .collect())
    }

    fn count_accounts_by_user(&self, user_id: &UserId) -> Result<usize> {
        Ok(self
            .lock()
            .accounts
            .values()
            .filter(|account| account.user_id == *user_id)
            .count())
    }

    fn account_number_exists(&self, account_number: &AccountNumber) -> Result<bool> {
        Ok(self.lock().accounts.contains_key(account_number))
    }

    fn put_transaction(&self, transaction: &Transaction) -> Result<()> {
        self.lock()
            .transactions
            .insert(transaction.transaction_id.to_string(), transaction.clone());
        Ok(())
    }

    fn get_transaction(&self, transaction_id: &TransactionId) -> Result<Option<Transaction>> {
        Ok(self
            .lock()
            .transactions
            .get(&transaction_id.to_string())
            .cloned())
    }

    fn apply_transaction(&self, account: &Account, transaction: &Transaction) -> Result<()> {
        let mut inner = self.lock();
        inner
            .accounts
            .insert(account.account_number.clone(), account.clone());
        inner
            .transactions
            .insert(transaction.transaction_id.to_string(), transaction.clone());
        Ok(())
    }
}
