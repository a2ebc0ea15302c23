//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Username already taken")]
    UserNameTaken,

    /// Storage refused an insert on a unique constraint we could not attribute
    #[error("Account already exists")]
    AccountExists,

    /// Unknown email and wrong password share this variant and message
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Account is inactive. Please contact support.")]
    AccountInactive,

    /// Missing, malformed, forged or expired bearer token, or a token whose
    /// account no longer exists
    #[error("Could not validate credentials")]
    SessionInvalid,

    #[error("You don't have permission to access this resource")]
    InsufficientRole,

    #[error("User not found")]
    AccountNotFound,

    #[error("Incorrect current password")]
    IncorrectPassword,

    /// Request payload failed field validation
    #[error("{}", .0.message())]
    Validation(AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// HTTP status code for this error
    ///
    /// Conflicts answer 400 rather than 409: registration clients were built
    /// against that status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::EmailTaken
            | AccountError::UserNameTaken
            | AccountError::AccountExists => StatusCode::BAD_REQUEST,
            AccountError::InvalidCredentials | AccountError::SessionInvalid => {
                StatusCode::UNAUTHORIZED
            }
            AccountError::AccountInactive | AccountError::InsufficientRole => {
                StatusCode::FORBIDDEN
            }
            AccountError::AccountNotFound => StatusCode::NOT_FOUND,
            AccountError::IncorrectPassword | AccountError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AccountError::Database(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::EmailTaken
            | AccountError::UserNameTaken
            | AccountError::AccountExists => ErrorKind::Conflict,
            AccountError::InvalidCredentials | AccountError::SessionInvalid => {
                ErrorKind::Unauthorized
            }
            AccountError::AccountInactive | AccountError::InsufficientRole => ErrorKind::Forbidden,
            AccountError::AccountNotFound => ErrorKind::NotFound,
            AccountError::IncorrectPassword | AccountError::Validation(_) => ErrorKind::BadRequest,
            AccountError::Database(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; their details only reach
    /// the log.
    pub fn to_app_error(&self) -> AppError {
        let app_error = match self {
            AccountError::Database(_) | AccountError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AccountError::Validation(err) => {
                let mut validation = AppError::bad_request(err.message().to_string());
                if let Some(action) = err.action() {
                    validation = validation.with_action(action.to_string());
                }
                validation
            }
            other => AppError::new(other.kind(), other.to_string()),
        };

        app_error.with_status(self.status_code().as_u16())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::InsufficientRole => {
                tracing::warn!("Role check denied access");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();

        let unauthorized = self.status_code() == StatusCode::UNAUTHORIZED;
        let mut response = self.to_app_error().into_response();

        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AccountError::Validation(err),
            _ => AccountError::Internal(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AccountError {
    fn from(err: tokio::task::JoinError) -> Self {
        AccountError::Internal(format!("Blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_statuses() {
        assert_eq!(AccountError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AccountError::EmailTaken.kind(), ErrorKind::Conflict);
        assert_eq!(
            AccountError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AccountError::AccountInactive.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AccountError::InsufficientRole.kind(), ErrorKind::Forbidden);
        assert_eq!(AccountError::AccountNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AccountError::IncorrectPassword.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_internal_details_do_not_leak() {
        let err = AccountError::Internal("connection refused to 10.0.0.3".to_string());
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("10.0.0.3"));
    }

    #[test]
    fn test_unauthorized_response_has_challenge() {
        let response = AccountError::SessionInvalid.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_bad_request_app_error_becomes_validation() {
        let err: AccountError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AccountError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid email format");
    }
}
