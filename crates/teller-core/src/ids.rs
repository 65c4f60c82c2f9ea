//! Identifier types for the teller service.
//!
//! This module provides strongly-typed identifiers for users, accounts,
//! and transactions, with string parsing that enforces their formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal digits in an account number.
pub const ACCOUNT_NUMBER_LEN: usize = 10;

/// Length of a transaction id in hex characters.
pub const TRANSACTION_ID_LEN: usize = 32;

/// A user identifier.
///
/// User ids are assigned by the user registry, which is outside this
/// system; negative values are representable so that the API layer can
/// reject them explicitly rather than at parse time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a user id from its raw numeric value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw numeric value.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Whether the id is negative (invalid for lookups).
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A 10-digit, zero-padded account number.
///
/// Account numbers are the natural key of an account and are unique
/// across the whole system.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Render a drawn value in [0, 10^10) as a zero-padded account number.
    ///
    /// # Panics
    ///
    /// Panics if `draw` is outside [0, 10^10); callers draw from a bounded
    /// range so this indicates a programming error.
    #[must_use]
    pub fn from_draw(draw: u64) -> Self {
        assert!(draw < 10_000_000_000, "account number draw out of range");
        Self(format!("{draw:010}"))
    }

    /// Return the account number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountNumber {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ACCOUNT_NUMBER_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::InvalidAccountNumber);
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Debug for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountNumber({})", self.0)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountNumber> for String {
    fn from(number: AccountNumber) -> Self {
        number.0
    }
}

impl AsRef<[u8]> for AccountNumber {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// An opaque, globally unique transaction identifier.
///
/// Rendered as exactly 32 lowercase hex characters with no separators
/// (a random 128-bit value in UUID simple format).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(uuid::Uuid);

impl TransactionId {
    /// Generate a new random transaction id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Return the bytes of the identifier (16 bytes).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Create a transaction id from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Uuid::from_bytes(bytes))
    }
}

impl FromStr for TransactionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != TRANSACTION_ID_LEN || s.contains('-') {
            return Err(IdError::InvalidTransactionId);
        }
        let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidTransactionId)?;
        Ok(Self(uuid))
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", self.0.simple())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl TryFrom<String> for TransactionId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransactionId> for String {
    fn from(id: TransactionId) -> Self {
        id.0.simple().to_string()
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a 10-digit account number.
    #[error("account number must be exactly 10 decimal digits")]
    InvalidAccountNumber,

    /// The input is not a 32-character hex transaction id.
    #[error("transaction id must be exactly 32 hex characters")]
    InvalidTransactionId,
}
