//! Balance use/cancel and transaction query handlers.
//!
//! On a domain failure during use or cancel, the handler records a FAIL
//! transaction for the account (best effort) before surfacing the error,
//! so every attempt leaves a durable trace.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use teller_core::{
    AccountError, AccountNumber, TransactionId, TransactionResult, TransactionType, UserId,
};

use crate::error::ApiError;
use crate::services::TransactionDto;
use crate::state::AppState;

/// Smallest accepted use/cancel amount.
const MIN_AMOUNT: i64 = 10;

/// Largest accepted use/cancel amount.
const MAX_AMOUNT: i64 = 1_000_000_000;

fn parse_amount(amount: i64) -> Result<i64, ApiError> {
    if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
        return Err(AccountError::InvalidRequest(format!(
            "amount must be in [{MIN_AMOUNT}, {MAX_AMOUNT}], got {amount}"
        ))
        .into());
    }
    Ok(amount)
}

fn parse_account_number(raw: &str) -> Result<AccountNumber, ApiError> {
    raw.parse()
        .map_err(|e: teller_core::IdError| ApiError(e.into()))
}

/// Use balance request.
#[derive(Debug, Deserialize)]
pub struct UseBalanceRequest {
    /// The account owner; must be >= 1.
    pub user_id: i64,
    /// The 10-digit account number.
    pub account_number: String,
    /// Amount to debit, in [10, 1_000_000_000].
    pub amount: i64,
}

/// Response shared by use and cancel.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// The account transacted against.
    pub account_number: AccountNumber,
    /// Success or fail.
    pub transaction_result: TransactionResult,
    /// The new transaction's id.
    pub transaction_id: TransactionId,
    /// The amount involved.
    pub amount: i64,
    /// When the attempt occurred.
    pub transacted_at: DateTime<Utc>,
}

impl From<&TransactionDto> for TransactionResponse {
    fn from(dto: &TransactionDto) -> Self {
        Self {
            account_number: dto.account_number.clone(),
            transaction_result: dto.result,
            transaction_id: dto.transaction_id,
            amount: dto.amount,
            transacted_at: dto.transacted_at,
        }
    }
}

/// Debit an account balance.
pub async fn use_balance(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UseBalanceRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    if body.user_id < 1 {
        return Err(AccountError::InvalidRequest(format!(
            "user_id must be >= 1, got {}",
            body.user_id
        ))
        .into());
    }
    let account_number = parse_account_number(&body.account_number)?;
    let amount = parse_amount(body.amount)?;

    match state
        .transactions
        .use_balance(UserId::new(body.user_id), &account_number, amount)
    {
        Ok(dto) => Ok(Json(TransactionResponse::from(&dto))),
        Err(err) => {
            record_failure(&state, TransactionType::Use, &account_number, amount);
            Err(err.into())
        }
    }
}

/// Cancel balance request.
#[derive(Debug, Deserialize)]
pub struct CancelBalanceRequest {
    /// The 32-hex-character id of the transaction to cancel.
    pub transaction_id: String,
    /// The 10-digit account number.
    pub account_number: String,
    /// Amount to credit back; must equal the original amount.
    pub amount: i64,
}

/// Reverse an earlier balance use.
pub async fn cancel_balance(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CancelBalanceRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let transaction_id: TransactionId = body
        .transaction_id
        .parse()
        .map_err(|e: teller_core::IdError| ApiError(e.into()))?;
    let account_number = parse_account_number(&body.account_number)?;
    let amount = parse_amount(body.amount)?;

    match state
        .transactions
        .cancel_balance(&transaction_id, &account_number, amount)
    {
        Ok(dto) => Ok(Json(TransactionResponse::from(&dto))),
        Err(err) => {
            record_failure(&state, TransactionType::Cancel, &account_number, amount);
            Err(err.into())
        }
    }
}

/// Record the FAIL transaction for a failed use/cancel attempt.
///
/// Best effort: when the account itself is missing this cannot succeed,
/// and the primary error is the one worth surfacing.
fn record_failure(
    state: &AppState,
    transaction_type: TransactionType,
    account_number: &AccountNumber,
    amount: i64,
) {
    let result = match transaction_type {
        TransactionType::Use => state.transactions.record_failed_use(account_number, amount),
        TransactionType::Cancel => state
            .transactions
            .record_failed_cancel(account_number, amount),
    };
    if let Err(record_err) = result {
        tracing::warn!(
            %account_number,
            ?transaction_type,
            error = %record_err,
            "could not record failed transaction"
        );
    }
}

/// Query transaction response.
#[derive(Debug, Serialize)]
pub struct QueryTransactionResponse {
    /// The account transacted against.
    pub account_number: AccountNumber,
    /// Use or cancel.
    pub transaction_type: TransactionType,
    /// Success or fail.
    pub transaction_result: TransactionResult,
    /// The transaction id.
    pub transaction_id: TransactionId,
    /// The amount involved.
    pub amount: i64,
    /// When the attempt occurred.
    pub transacted_at: DateTime<Utc>,
}

/// Look up a transaction by id.
pub async fn query_transaction(
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<QueryTransactionResponse>, ApiError> {
    let transaction_id: TransactionId = transaction_id
        .parse()
        .map_err(|e: teller_core::IdError| ApiError(e.into()))?;

    let dto = state.transactions.query_transaction(&transaction_id)?;

    Ok(Json(QueryTransactionResponse {
        account_number: dto.account_number,
        transaction_type: dto.transaction_type,
        transaction_result: dto.result,
        transaction_id: dto.transaction_id,
        amount: dto.amount,
        transacted_at: dto.transacted_at,
    }))
}
