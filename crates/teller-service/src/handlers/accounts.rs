//! Account lifecycle handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use teller_core::{AccountError, AccountNumber, UserId};

use crate::error::ApiError;
use crate::services::AccountDto;
use crate::state::AppState;

fn parse_user_id(user_id: i64) -> Result<UserId, ApiError> {
    if user_id < 1 {
        return Err(AccountError::InvalidRequest(format!("user_id must be >= 1, got {user_id}")).into());
    }
    Ok(UserId::new(user_id))
}

fn parse_account_number(raw: &str) -> Result<AccountNumber, ApiError> {
    raw.parse()
        .map_err(|e: teller_core::IdError| ApiError(e.into()))
}

/// Create account request.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// The owning user; must be >= 1.
    pub user_id: i64,
    /// Opening balance; must be >= 0.
    pub initial_balance: i64,
}

/// Create account response.
#[derive(Debug, Serialize)]
pub struct CreateAccountResponse {
    /// The owning user.
    pub user_id: UserId,
    /// The freshly generated account number.
    pub account_number: AccountNumber,
    /// When the account was opened.
    pub registered_at: DateTime<Utc>,
}

/// Open a new account.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<Json<CreateAccountResponse>, ApiError> {
    let user_id = parse_user_id(body.user_id)?;
    if body.initial_balance < 0 {
        return Err(AccountError::InvalidRequest(format!(
            "initial_balance must be >= 0, got {}",
            body.initial_balance
        ))
        .into());
    }

    let dto = state.accounts.create_account(user_id, body.initial_balance)?;

    Ok(Json(CreateAccountResponse {
        user_id: dto.user_id,
        account_number: dto.account_number,
        registered_at: dto.registered_at,
    }))
}

/// List accounts query parameters.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// The owning user.
    pub user_id: i64,
}

/// One account in a listing.
#[derive(Debug, Serialize)]
pub struct AccountInfo {
    /// The account number.
    pub account_number: AccountNumber,
    /// Current balance.
    pub balance: i64,
}

impl From<&AccountDto> for AccountInfo {
    fn from(dto: &AccountDto) -> Self {
        Self {
            account_number: dto.account_number.clone(),
            balance: dto.balance,
        }
    }
}

/// List all accounts of a user.
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<AccountInfo>>, ApiError> {
    let accounts = state.accounts.list_accounts(UserId::new(query.user_id))?;
    Ok(Json(accounts.iter().map(AccountInfo::from).collect()))
}

/// Close account request.
#[derive(Debug, Deserialize)]
pub struct CloseAccountRequest {
    /// The owning user; must be >= 1.
    pub user_id: i64,
    /// The 10-digit account number to close.
    pub account_number: String,
}

/// Close account response.
#[derive(Debug, Serialize)]
pub struct CloseAccountResponse {
    /// The owning user.
    pub user_id: UserId,
    /// The closed account number.
    pub account_number: AccountNumber,
    /// When the account was closed.
    pub unregistered_at: Option<DateTime<Utc>>,
}

/// Close an account.
pub async fn close_account(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CloseAccountRequest>,
) -> Result<Json<CloseAccountResponse>, ApiError> {
    let user_id = parse_user_id(body.user_id)?;
    let account_number = parse_account_number(&body.account_number)?;

    let dto = state.accounts.close_account(user_id, &account_number)?;

    Ok(Json(CloseAccountResponse {
        user_id: dto.user_id,
        account_number: dto.account_number,
        unregistered_at: dto.unregistered_at,
    }))
}
