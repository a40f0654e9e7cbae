use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login, register, send_otp, verify_otp};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/login", post(login))
}
