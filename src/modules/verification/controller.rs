use axum::Json;
use axum::extract::{Multipart, State};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{ManualVerifyRequest, ManualVerifyResponse, UploadIdResponse};
use super::service::VerificationService;

/// Manually verify a user whose email domain did not match
#[utoipa::path(
    post,
    path = "/api/verify",
    request_body = ManualVerifyRequest,
    responses(
        (status = 200, description = "User verified (by domain recheck or manual approval)", body = ManualVerifyResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Actor may not approve manual verification", body = ErrorResponse),
        (status = 404, description = "User or college not found", body = ErrorResponse)
    ),
    tag = "Verification",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn manual_verify(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<ManualVerifyRequest>,
) -> Result<Json<ManualVerifyResponse>, AppError> {
    let response =
        VerificationService::manual_verify(state.store.as_ref(), auth_user.role(), dto).await?;
    Ok(Json(response))
}

/// Upload an ID card image and re-enter manual review
///
/// Multipart form with `email`, `college` (shortcode), and an `id_card` file
/// field. The bytes go to file storage; the engine records the resulting URL
/// and resets the user to unverified.
#[utoipa::path(
    post,
    path = "/api/upload-id",
    responses(
        (status = 200, description = "ID card stored, pending manual review", body = UploadIdResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Malformed multipart body", body = ErrorResponse)
    ),
    tag = "Verification"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_id(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadIdResponse>, AppError> {
    let mut email: Option<String> = None;
    let mut college: Option<String> = None;
    let mut id_card: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("email") => {
                email = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid email field: {e}"))
                })?);
            }
            Some("college") => {
                college = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid college field: {e}"))
                })?);
            }
            Some("id_card") => {
                let file_name = field.file_name().unwrap_or("id-card").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Invalid id_card field: {e}"))
                })?;
                id_card = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let email = email.ok_or_else(|| AppError::validation("email is required"))?;
    let college = college.ok_or_else(|| AppError::validation("college is required"))?;
    let (file_name, bytes) = id_card.ok_or_else(|| AppError::validation("id_card is required"))?;

    let url = state.files.store(&file_name, &bytes).await?;

    let response =
        VerificationService::record_id_upload(state.store.as_ref(), &email, &college, &url)
            .await?;
    Ok(Json(response))
}
