//! Document-store ports.
//!
//! The engine reaches persistence only through these traits, which expose
//! plain find/insert/update operations. Adapters map their backend failures
//! into [`StoreError`] instead of leaking driver types into services.
//!
//! There are no multi-document transactions: each operation is a short
//! sequence of reads and whole-record writes, last writer wins. Concurrent
//! OTP issuance for the same user can slip past the cooldown check between
//! the read and the write; contention is per-user and the window is one
//! round trip, so no optimistic locking is applied.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::colleges::model::College;
use crate::modules::products::model::Product;
use crate::modules::users::model::User;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key (user email, college shortcode) is already taken.
    #[error("unique key conflict: {0}")]
    Conflict(String),
    #[error("store backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}

impl From<StoreError> for crate::utils::errors::AppError {
    fn from(err: StoreError) -> Self {
        Self::Internal(anyhow::anyhow!(err))
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Compound-key lookup used by OTP confirmation: a user matches only if
    /// both the email and the currently stored code are equal.
    async fn find_user_by_email_and_otp(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<User>, StoreError>;

    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// Whole-record write keyed by id. Last writer wins.
    async fn update_user(&self, user: &User) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CollegeStore: Send + Sync {
    async fn find_college_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<College>, StoreError>;

    async fn find_college_by_id(&self, id: Uuid) -> Result<Option<College>, StoreError>;

    /// List colleges, optionally filtered by a case-insensitive name
    /// substring.
    async fn list_colleges(&self, search: Option<&str>) -> Result<Vec<College>, StoreError>;

    async fn insert_college(&self, college: &College) -> Result<(), StoreError>;

    async fn update_college(&self, college: &College) -> Result<(), StoreError>;

    /// Returns `false` when no college with the given id existed.
    async fn delete_college(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError>;

    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn insert_product(&self, product: &Product) -> Result<(), StoreError>;

    async fn update_product(&self, product: &Product) -> Result<(), StoreError>;

    /// Returns `false` when no product with the given id existed.
    async fn delete_product(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Combined store handle held in application state.
pub trait Store: UserStore + CollegeStore + ProductStore {}

impl<T: UserStore + CollegeStore + ProductStore> Store for T {}
