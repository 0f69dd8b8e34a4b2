use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::error;

/// SQLSTATE raised by Postgres when `statement_timeout` kills a query.
const QUERY_CANCELED: &str = "57014";

/// Every failure a request can surface, mapped to a response in one place.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing input values")]
    MissingFields,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("User not found")]
    NotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Database unavailable")]
    StoreUnavailable,
    #[error("malformed password digest")]
    InvalidDigestFormat,
    #[error("schema creation failed")]
    Schema(#[source] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::UniqueViolation => ApiError::DuplicateEmail,
                _ if db.code().as_deref() == Some(QUERY_CANCELED) => ApiError::StoreUnavailable,
                _ => ApiError::Internal(sqlx::Error::Database(db).into()),
            },
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => ApiError::StoreUnavailable,
            other => ApiError::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials | ApiError::AuthenticationFailed => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidDigestFormat | ApiError::Schema(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!(error = %self, "request failed");
            (status, "Internal server error".to_string()).into_response()
        } else {
            (status, self.to_string()).into_response()
        }
    }
}
