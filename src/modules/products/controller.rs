use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
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

use super::model::{CreateProductDto, Product, UpdateProductDto};
use super::service::ProductService;

/// List marketplace products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Products", body = [Product])
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductService::list(state.store.as_ref()).await?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Requires admin role", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    check_any_role(&auth_user, &[Role::Admin])?;

    let product = ProductService::create(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 403, description = "Requires admin role", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProductDto>,
) -> Result<Json<Product>, AppError> {
    check_any_role(&auth_user, &[Role::Admin])?;

    let product = ProductService::update(state.store.as_ref(), id, dto).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 403, description = "Requires admin role", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    check_any_role(&auth_user, &[Role::Admin])?;

    ProductService::delete(state.store.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}
