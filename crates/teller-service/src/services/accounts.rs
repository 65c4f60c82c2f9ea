//! Account lifecycle operations: create, list, close.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use teller_core::{rules, Account, AccountError, AccountNumber, Result, UserId};
use teller_store::Store;

use super::numbers::AccountNumberGenerator;

/// Projection of an account returned by lifecycle operations.
#[derive(Debug, Clone, Serialize)]
pub struct AccountDto {
    /// The owning user.
    pub user_id: UserId,
    /// The account number.
    pub account_number: AccountNumber,
    /// Current balance.
    pub balance: i64,
    /// When the account was opened.
    pub registered_at: DateTime<Utc>,
    /// When the account was closed, if it has been.
    pub unregistered_at: Option<DateTime<Utc>>,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.user_id,
            account_number: account.account_number.clone(),
            balance: account.balance,
            registered_at: account.registered_at,
            unregistered_at: account.unregistered_at,
        }
    }
}

/// Manages the account lifecycle for registered users.
pub struct AccountService<S> {
    store: Arc<S>,
    numbers: AccountNumberGenerator<S>,
}

impl<S: Store> AccountService<S> {
    /// Create a lifecycle service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            numbers: AccountNumberGenerator::new(Arc::clone(&store)),
            store,
        }
    }

    /// Open a new account for `user_id` with `initial_balance`.
    ///
    /// The caller validates `user_id >= 1` and `initial_balance >= 0`
    /// before this point.
    ///
    /// # Errors
    ///
    /// `UserNotFound` if the user does not exist; `MaxAccountsExceeded`
    /// if the user already holds the maximum number of accounts.
    pub fn create_account(&self, user_id: UserId, initial_balance: i64) -> Result<AccountDto> {
        let user = self
            .store
            .get_user(&user_id)?
            .ok_or(AccountError::UserNotFound {
                user_id: user_id.get(),
            })?;

        let count = self.store.count_accounts_by_user(&user.id)?;
        rules::validate_create_account(count)?;

        let account_number = self.numbers.generate()?;
        let account = Account::open(user.id, account_number, initial_balance, Utc::now());
        self.store.put_account(&account)?;

        tracing::info!(
            user_id = %account.user_id,
            account_number = %account.account_number,
            balance = account.balance,
            "account created"
        );

        Ok(AccountDto::from(&account))
    }

    /// List all accounts of `user_id`, any status, in storage order.
    ///
    /// # Errors
    ///
    /// `InvalidUserId` for negative ids; `UserNotFound` if the user does
    /// not exist.
    pub fn list_accounts(&self, user_id: UserId) -> Result<Vec<AccountDto>> {
        if user_id.is_negative() {
            return Err(AccountError::InvalidUserId {
                user_id: user_id.get(),
            });
        }

        let user = self
            .store
            .get_user(&user_id)?
            .ok_or(AccountError::UserNotFound {
                user_id: user_id.get(),
            })?;

        let accounts = self.store.list_accounts_by_user(&user.id)?;
        Ok(accounts.iter().map(AccountDto::from).collect())
    }

    /// Close the account `account_number` owned by `user_id`.
    ///
    /// # Errors
    ///
    /// `UserNotFound` / `AccountNotFound` on lookup, then the close
    /// rules: `OwnerMismatch`, `AlreadyClosed`, `BalanceNotEmpty`.
    pub fn close_account(
        &self,
        user_id: UserId,
        account_number: &AccountNumber,
    ) -> Result<AccountDto> {
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

        rules::validate_close_account(&user, &account)?;

        account.unregister(Utc::now());
        self.store.put_account(&account)?;

        tracing::info!(
            user_id = %account.user_id,
            account_number = %account.account_number,
            "account closed"
        );

        Ok(AccountDto::from(&account))
    }
}
