use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::store::Store;
use crate::utils::errors::AppError;

use super::model::{CreateProductDto, Product, UpdateProductDto};

pub struct ProductService;

impl ProductService {
    #[instrument(skip(store))]
    pub async fn list(store: &dyn Store) -> Result<Vec<Product>, AppError> {
        Ok(store.list_products().await?)
    }

    #[instrument(skip(store, dto), fields(name = %dto.name))]
    pub async fn create(store: &dyn Store, dto: CreateProductDto) -> Result<Product, AppError> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: dto.name,
            image: dto.image,
            price: dto.price,
            category: dto.category,
            created_at: now,
            updated_at: now,
        };

        store.insert_product(&product).await?;
        Ok(product)
    }

    #[instrument(skip(store, dto))]
    pub async fn update(
        store: &dyn Store,
        id: Uuid,
        dto: UpdateProductDto,
    ) -> Result<Product, AppError> {
        let mut product = store
            .find_product_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        if let Some(name) = dto.name {
            product.name = name;
        }
        if let Some(image) = dto.image {
            product.image = Some(image);
        }
        if let Some(price) = dto.price {
            product.price = Some(price);
        }
        if let Some(category) = dto.category {
            product.category = Some(category);
        }
        product.updated_at = Utc::now();

        store.update_product(&product).await?;
        Ok(product)
    }

    #[instrument(skip(store))]
    pub async fn delete(store: &dyn Store, id: Uuid) -> Result<(), AppError> {
        if !store.delete_product(id).await? {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }
}
