//! Domain error types for the teller service.

use crate::ids::IdError;

/// Result type for teller domain operations.
pub type Result<T> = std::result::Result<T, AccountError>;

/// Errors that can occur in teller domain operations.
///
/// Every failure surfaced by the account lifecycle and transaction
/// processing operations is one of these kinds; the API layer maps them
/// to stable error codes via [`AccountError::error_code`].
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Malformed input caught before reaching the domain logic.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// User not found.
    #[error("user not found: {user_id}")]
    UserNotFound {
        /// The user id that was not found.
        user_id: i64,
    },

    /// Negative user id supplied to a lookup.
    #[error("invalid user id: {user_id}")]
    InvalidUserId {
        /// The offending user id.
        user_id: i64,
    },

    /// Account not found.
    #[error("account not found: {account_number}")]
    AccountNotFound {
        /// The account number that was not found.
        account_number: String,
    },

    /// The account does not belong to the supplied user.
    #[error("account {account_number} is not owned by user {user_id}")]
    OwnerMismatch {
        /// The user id supplied by the caller.
        user_id: i64,
        /// The account in question.
        account_number: String,
    },

    /// Balance use attempted against an unregistered account.
    #[error("account {account_number} is unregistered")]
    AccountClosed {
        /// The account in question.
        account_number: String,
    },

    /// Close attempted against an already unregistered account.
    #[error("account {account_number} is already unregistered")]
    AlreadyClosed {
        /// The account in question.
        account_number: String,
    },

    /// Close attempted while the account still holds a balance.
    #[error("account balance is not empty: {balance}")]
    BalanceNotEmpty {
        /// The remaining balance.
        balance: i64,
    },

    /// Use amount exceeds the current balance.
    #[error("insufficient balance: balance={balance}, amount={amount}")]
    InsufficientBalance {
        /// Current account balance.
        balance: i64,
        /// Requested use amount.
        amount: i64,
    },

    /// The user already holds the maximum number of accounts.
    #[error("user already holds {count} accounts (max {max})")]
    MaxAccountsExceeded {
        /// Number of accounts currently held.
        count: usize,
        /// The per-user cap.
        max: usize,
    },

    /// Transaction not found.
    #[error("transaction not found: {transaction_id}")]
    TransactionNotFound {
        /// The transaction id that was not found.
        transaction_id: String,
    },

    /// The cancel target transaction belongs to a different account.
    #[error("transaction belongs to account {expected}, not {actual}")]
    TransactionAccountMismatch {
        /// The account recorded on the transaction.
        expected: String,
        /// The account supplied for the cancel.
        actual: String,
    },

    /// Cancel amount differs from the original transaction amount.
    #[error("partial cancel not allowed: original={original}, requested={requested}")]
    PartialCancelNotAllowed {
        /// The original transaction amount.
        original: i64,
        /// The requested cancel amount.
        requested: i64,
    },

    /// The original transaction is older than the cancel window.
    #[error("cancel window expired for transaction dated {transacted_at}")]
    CancelWindowExpired {
        /// When the original transaction occurred.
        transacted_at: chrono::DateTime<chrono::Utc>,
    },

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),
}

impl AccountError {
    /// A stable machine-readable code for this error kind.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) | Self::InvalidId(_) => "INVALID_REQUEST",
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::InvalidUserId { .. } => "INVALID_USER_ID",
            Self::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            Self::OwnerMismatch { .. } => "OWNER_MISMATCH",
            Self::AccountClosed { .. } => "ACCOUNT_CLOSED",
            Self::AlreadyClosed { .. } => "ALREADY_CLOSED",
            Self::BalanceNotEmpty { .. } => "BALANCE_NOT_EMPTY",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::MaxAccountsExceeded { .. } => "MAX_ACCOUNTS_EXCEEDED",
            Self::TransactionNotFound { .. } => "TRANSACTION_NOT_FOUND",
            Self::TransactionAccountMismatch { .. } => "TRANSACTION_ACCOUNT_MISMATCH",
            Self::PartialCancelNotAllowed { .. } => "PARTIAL_CANCEL_NOT_ALLOWED",
            Self::CancelWindowExpired { .. } => "CANCEL_WINDOW_EXPIRED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}
