//! The account-owning user.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// A registered user who may own accounts.
///
/// Users are created and managed outside this system; the teller only
/// ever reads them to resolve ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUser {
    /// The user id.
    pub id: UserId,

    /// Display name.
    pub username: String,
}

impl AccountUser {
    /// Create a user record.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
