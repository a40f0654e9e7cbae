//! PostgreSQL connection pool initialization.
//!
//! Reads the connection string from `DATABASE_URL`.

use sqlx::PgPool;
use std::env;

/// Initialize the connection pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection fails; this runs once
/// at startup where failing fast is the right behavior.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
