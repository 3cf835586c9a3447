// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use gatekeeper_common::messages;
use thiserror::Error;

use crate::flash;

/// Why a login attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    UnknownEmail,
    WrongPassword,
}

impl CredentialFailure {
    /// Text rendered on the login form
    pub fn message(self) -> &'static str {
        match self {
            CredentialFailure::UnknownEmail => messages::UNKNOWN_EMAIL,
            CredentialFailure::WrongPassword => messages::WRONG_PASSWORD,
        }
    }
}

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Invalid credentials: {}", .0.message())]
    InvalidCredentials(CredentialFailure),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized => StatusCode::SEE_OTHER,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials(_) => "AUTH_001",
            AppError::Unauthorized => "AUTH_002",
            AppError::DuplicateEmail => "USER_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Storage(_) => "DB_001",
            AppError::PasswordHash(_) => "HASH_001",
            AppError::Io(_) => "IO_001",
            AppError::Config(_) => "CFG_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::DuplicateEmail => messages::ALREADY_REGISTERED.to_string(),
            AppError::InvalidCredentials(failure) => failure.message().to_string(),
            AppError::Unauthorized => messages::LOGIN_REQUIRED.to_string(),
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Storage(_)
            | AppError::PasswordHash(_)
            | AppError::Io(_)
            | AppError::Config(_)
            | AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unauthorized = self {
            let jar = flash::set(CookieJar::new(), messages::LOGIN_REQUIRED);
            return (jar, Redirect::to("/login")).into_response();
        }

        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<scrypt::password_hash::Error> for AppError {
    fn from(err: scrypt::password_hash::Error) -> Self {
        AppError::PasswordHash(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("blocking task failed: {err}"))
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
