//! PostgreSQL store adapter backed by `sqlx`.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::modules::colleges::model::College;
use crate::modules::products::model::Product;
use crate::modules::users::model::{Role, User, VerificationData};

use super::{CollegeStore, ProductStore, StoreError, UserStore};

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return StoreError::Conflict(db_err.message().to_string());
    }
    StoreError::Backend(err.into())
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: Role,
    college: String,
    verified: bool,
    verification_data: Option<Json<VerificationData>>,
    register_otp: Option<String>,
    last_otp: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role,
            college: row.college,
            verified: row.verified,
            verification_data: row.verification_data.map(|data| data.0),
            register_otp: row.register_otp,
            last_otp: row.last_otp,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, role, college, \
     verified, verification_data, register_otp, last_otp, created_at, updated_at";

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(User::from))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(User::from))
    }

    async fn find_user_by_email_and_otp(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND register_otp = $2"
        ))
        .bind(email)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(User::from))
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, first_name, last_name, role, college, \
             verified, verification_data, register_otp, last_otp, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role)
        .bind(&user.college)
        .bind(user.verified)
        .bind(user.verification_data.clone().map(Json))
        .bind(&user.register_otp)
        .bind(user.last_otp)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE users SET email = $2, password_hash = $3, first_name = $4, last_name = $5, \
             role = $6, college = $7, verified = $8, verification_data = $9, register_otp = $10, \
             last_otp = $11, updated_at = $12
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role)
        .bind(&user.college)
        .bind(user.verified)
        .bind(user.verification_data.clone().map(Json))
        .bind(&user.register_otp)
        .bind(user.last_otp)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct CollegeRow {
    id: Uuid,
    name: String,
    short_code: String,
    email_extensions: Vec<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CollegeRow> for College {
    fn from(row: CollegeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            short_code: row.short_code,
            email_extensions: row.email_extensions,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CollegeStore for PgStore {
    async fn find_college_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<College>, StoreError> {
        let row = sqlx::query_as::<_, CollegeRow>(
            "SELECT id, name, short_code, email_extensions, created_at, updated_at
             FROM colleges WHERE short_code = $1",
        )
        .bind(short_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(College::from))
    }

    async fn find_college_by_id(&self, id: Uuid) -> Result<Option<College>, StoreError> {
        let row = sqlx::query_as::<_, CollegeRow>(
            "SELECT id, name, short_code, email_extensions, created_at, updated_at
             FROM colleges WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(College::from))
    }

    async fn list_colleges(&self, search: Option<&str>) -> Result<Vec<College>, StoreError> {
        let rows = match search {
            Some(needle) => {
                sqlx::query_as::<_, CollegeRow>(
                    "SELECT id, name, short_code, email_extensions, created_at, updated_at
                     FROM colleges WHERE name ILIKE $1 ORDER BY name",
                )
                .bind(format!("%{needle}%"))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, CollegeRow>(
                    "SELECT id, name, short_code, email_extensions, created_at, updated_at
                     FROM colleges ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(College::from).collect())
    }

    async fn insert_college(&self, college: &College) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO colleges (id, name, short_code, email_extensions, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(college.id)
        .bind(&college.name)
        .bind(&college.short_code)
        .bind(&college.email_extensions)
        .bind(college.created_at)
        .bind(college.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn update_college(&self, college: &College) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE colleges SET name = $2, email_extensions = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(college.id)
        .bind(&college.name)
        .bind(&college.email_extensions)
        .bind(college.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn delete_college(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM colleges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, image, price, category, created_at, updated_at
             FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Product::from))
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, image, price, category, created_at, updated_at
             FROM products ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO products (id, name, image, price, category, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.image)
        .bind(&product.price)
        .bind(&product.category)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE products SET name = $2, image = $3, price = $4, category = $5, updated_at = $6
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.image)
        .bind(&product.price)
        .bind(&product.category)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    image: Option<String>,
    price: Option<String>,
    category: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image: row.image,
            price: row.price,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
