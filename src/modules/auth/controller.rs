use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    ConfirmOtpResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto,
    SendOtpRequest, VerifyOtpRequest,
};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub error: bool,
}

/// Register a new account and dispatch the first OTP email
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered, OTP sent", body = MessageResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "OTP email could not be delivered", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let response = AuthService::register(state.store.as_ref(), state.mailer.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Issue a fresh OTP, subject to the 60-second cooldown
#[utoipa::path(
    post,
    path = "/api/send-otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "OTP sent", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 429, description = "Cooldown still active", body = ErrorResponse),
        (status = 502, description = "OTP email could not be delivered", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn send_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SendOtpRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let response =
        AuthService::issue_otp(state.store.as_ref(), state.mailer.as_ref(), &dto.email).await?;
    Ok(Json(response))
}

/// Confirm an OTP and run the email-domain verification decision
#[utoipa::path(
    post,
    path = "/api/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "OTP confirmed; `id_card` signals whether a document upload is needed", body = ConfirmOtpResponse),
        (status = 400, description = "Invalid OTP", body = ErrorResponse),
        (status = 404, description = "Declared college not found", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyOtpRequest>,
) -> Result<Json<ConfirmOtpResponse>, AppError> {
    let response = AuthService::confirm_otp(state.store.as_ref(), dto).await?;
    Ok(Json(response))
}

/// Login and receive a bearer token (1-hour expiry)
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account not verified", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(state.store.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}
