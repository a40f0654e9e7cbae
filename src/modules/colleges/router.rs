use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{create_college, delete_college, list_colleges, update_college};

/// Reads are public; the write handlers gate on admin/college role.
pub fn init_colleges_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_colleges).post(create_college))
        .route("/{id}", put(update_college).delete(delete_college))
}
