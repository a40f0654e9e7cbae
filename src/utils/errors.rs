//! Application error taxonomy.
//!
//! Every operation boundary returns [`AppError`]; handlers never panic on a
//! classified failure. Each variant maps to a fixed HTTP status and a JSON
//! body of the form `{"message": ..., "error": true}`. Unclassified failures
//! collapse into [`AppError::Internal`], which is logged in full but surfaced
//! to the caller as a generic 500 with no internal detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    /// A user with the given email already exists.
    DuplicateEmail,
    /// A college with the given shortcode already exists.
    DuplicateShortCode,
    UserNotFound,
    CollegeNotFound,
    ProductNotFound,
    /// No user matches the (email, code) pair.
    InvalidOtp,
    /// A new OTP was requested before the 60-second cooldown elapsed.
    OtpCooldown { retry_after_secs: i64 },
    UserNotVerified,
    InvalidCredentials,
    InvalidToken(String),
    AuthorizationDenied(String),
    EmailDelivery(String),
    Validation(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::AuthorizationDenied(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn internal_error<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::DuplicateEmail | Self::DuplicateShortCode => StatusCode::CONFLICT,
            Self::UserNotFound | Self::CollegeNotFound | Self::ProductNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidOtp => StatusCode::BAD_REQUEST,
            Self::OtpCooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::UserNotVerified => StatusCode::FORBIDDEN,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            Self::EmailDelivery(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::DuplicateEmail => "Email already registered".to_string(),
            Self::DuplicateShortCode => "College shortcode already exists".to_string(),
            Self::UserNotFound => "User not found".to_string(),
            Self::CollegeNotFound => "College not found".to_string(),
            Self::ProductNotFound => "Product not found".to_string(),
            Self::InvalidOtp => "Invalid OTP".to_string(),
            Self::OtpCooldown { retry_after_secs } => {
                format!("OTP already sent. Retry in {retry_after_secs} seconds")
            }
            Self::UserNotVerified => "Account is not verified".to_string(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::InvalidToken(msg) => msg.clone(),
            Self::AuthorizationDenied(msg) => msg.clone(),
            Self::EmailDelivery(msg) => msg.clone(),
            Self::Validation(msg) => msg.clone(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref err) = self {
            error!(error = ?err, "unhandled internal error");
        }

        let body = Json(json!({
            "message": self.message(),
            "error": true,
        }));

        (self.status(), body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.into())
    }
}
