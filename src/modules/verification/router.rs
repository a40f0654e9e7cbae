use axum::{Router, middleware, routing::post};

use crate::middleware::role::require_reviewer;
use crate::state::AppState;

use super::controller::{manual_verify, upload_id};

/// `/verify` is gated to admin/college reviewers at the route level; the
/// service re-checks the actor as well. `/upload-id` is reachable without a
/// token, matching the registration flow it belongs to.
pub fn init_verification_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/verify", post(manual_verify))
        .route_layer(middleware::from_fn_with_state(state, require_reviewer))
        .route("/upload-id", post(upload_id))
}
