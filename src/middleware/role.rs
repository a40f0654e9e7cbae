//! Role-based authorization middleware.
//!
//! Routes that mutate the catalog or approve manual verification are wrapped
//! with one of these layers. Roles are a closed enum, so every check matches
//! exhaustively; a token carrying an unknown role never gets this far because
//! deserialization already rejected it.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    check_any_role(&auth_user, allowed_roles)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Layer for the manual verification route, open to admin and college-role
/// actors. Catalog writes check roles in the handler instead because their
/// method routers mix public and gated routes on the same path.
pub async fn require_reviewer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[Role::Admin, Role::College]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Check the authenticated actor against an allowed set, for use inside
/// handlers and services.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    let role = auth_user.role();

    if !allowed_roles.contains(&role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {allowed_roles:?}, but user has role: {role}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::model::Claims;
    use uuid::Uuid;

    fn auth_user(role: Role) -> AuthUser {
        AuthUser(Claims {
            sub: Uuid::new_v4().to_string(),
            role,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_role_in_allowed_set_passes() {
        assert!(check_any_role(&auth_user(Role::Admin), &[Role::Admin]).is_ok());
        assert!(
            check_any_role(&auth_user(Role::College), &[Role::Admin, Role::College]).is_ok()
        );
    }

    #[test]
    fn test_role_outside_allowed_set_is_denied() {
        let result = check_any_role(&auth_user(Role::Student), &[Role::Admin, Role::College]);
        assert!(matches!(result, Err(AppError::AuthorizationDenied(_))));
    }

    #[test]
    fn test_every_role_is_covered() {
        for role in [Role::Student, Role::Teacher, Role::Admin, Role::College] {
            let allowed = check_any_role(&auth_user(role), &[role]).is_ok();
            assert!(allowed);
        }
    }
}
