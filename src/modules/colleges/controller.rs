use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{College, CollegeFilterParams, CreateCollegeDto, UpdateCollegeDto};
use super::service::CollegeService;

/// List colleges, optionally filtered by name
#[utoipa::path(
    get,
    path = "/api/colleges",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive name substring")
    ),
    responses(
        (status = 200, description = "Colleges", body = [College])
    ),
    tag = "Colleges"
)]
#[instrument(skip(state))]
pub async fn list_colleges(
    State(state): State<AppState>,
    Query(filters): Query<CollegeFilterParams>,
) -> Result<Json<Vec<College>>, AppError> {
    let colleges = CollegeService::list(state.store.as_ref(), filters).await?;
    Ok(Json(colleges))
}

/// Create a college
#[utoipa::path(
    post,
    path = "/api/colleges",
    request_body = CreateCollegeDto,
    responses(
        (status = 201, description = "College created", body = College),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Requires admin or college role", body = ErrorResponse),
        (status = 409, description = "Shortcode already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Colleges",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_college(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCollegeDto>,
) -> Result<(StatusCode, Json<College>), AppError> {
    check_any_role(&auth_user, &[Role::Admin, Role::College])?;

    let college = CollegeService::create(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(college)))
}

/// Update a college's name or accepted email extensions
#[utoipa::path(
    put,
    path = "/api/colleges/{id}",
    params(("id" = Uuid, Path, description = "College ID")),
    request_body = UpdateCollegeDto,
    responses(
        (status = 200, description = "College updated", body = College),
        (status = 403, description = "Requires admin or college role", body = ErrorResponse),
        (status = 404, description = "College not found", body = ErrorResponse)
    ),
    tag = "Colleges",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_college(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCollegeDto>,
) -> Result<Json<College>, AppError> {
    check_any_role(&auth_user, &[Role::Admin, Role::College])?;

    let college = CollegeService::update(state.store.as_ref(), id, dto).await?;
    Ok(Json(college))
}

/// Delete a college
#[utoipa::path(
    delete,
    path = "/api/colleges/{id}",
    params(("id" = Uuid, Path, description = "College ID")),
    responses(
        (status = 200, description = "College deleted", body = MessageResponse),
        (status = 403, description = "Requires admin or college role", body = ErrorResponse),
        (status = 404, description = "College not found", body = ErrorResponse)
    ),
    tag = "Colleges",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_college(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    check_any_role(&auth_user, &[Role::Admin, Role::College])?;

    CollegeService::delete(state.store.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("College deleted")))
}
