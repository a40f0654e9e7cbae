use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{create_product, delete_product, list_products, update_product};

/// Reads are public; the write handlers gate on admin role.
pub fn init_products_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", put(update_product).delete(delete_product))
}
