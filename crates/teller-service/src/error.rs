//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use teller_core::AccountError;

/// API error type: a domain error carried to the HTTP boundary.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub AccountError);

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error_code: &'static str,
    error_message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }

        let body = ErrorResponse {
            error_code: self.0.error_code(),
            error_message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

fn status_for(err: &AccountError) -> StatusCode {
    match err {
        AccountError::InvalidRequest(_)
        | AccountError::InvalidId(_)
        | AccountError::InvalidUserId { .. } => StatusCode::BAD_REQUEST,

        AccountError::UserNotFound { .. }
        | AccountError::AccountNotFound { .. }
        | AccountError::TransactionNotFound { .. } => StatusCode::NOT_FOUND,

        AccountError::InsufficientBalance { .. } => StatusCode::PAYMENT_REQUIRED,

        AccountError::OwnerMismatch { .. }
        | AccountError::AccountClosed { .. }
        | AccountError::AlreadyClosed { .. }
        | AccountError::BalanceNotEmpty { .. }
        | AccountError::MaxAccountsExceeded { .. }
        | AccountError::TransactionAccountMismatch { .. }
        | AccountError::PartialCancelNotAllowed { .. }
        | AccountError::CancelWindowExpired { .. } => StatusCode::CONFLICT,

        AccountError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
