use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::store::{Store, StoreError};
use crate::utils::errors::AppError;

use super::model::{College, CollegeFilterParams, CreateCollegeDto, UpdateCollegeDto};

pub struct CollegeService;

impl CollegeService {
    #[instrument(skip(store, filters))]
    pub async fn list(
        store: &dyn Store,
        filters: CollegeFilterParams,
    ) -> Result<Vec<College>, AppError> {
        Ok(store.list_colleges(filters.search.as_deref()).await?)
    }

    #[instrument(skip(store, dto), fields(short_code = %dto.short_code))]
    pub async fn create(store: &dyn Store, dto: CreateCollegeDto) -> Result<College, AppError> {
        let now = Utc::now();
        let college = College {
            id: Uuid::new_v4(),
            name: dto.name,
            short_code: dto.short_code,
            email_extensions: dto.email_extensions,
            created_at: now,
            updated_at: now,
        };

        store
            .insert_college(&college)
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => AppError::DuplicateShortCode,
                other => other.into(),
            })?;

        info!(college_id = %college.id, "college created");
        Ok(college)
    }

    #[instrument(skip(store, dto))]
    pub async fn update(
        store: &dyn Store,
        id: Uuid,
        dto: UpdateCollegeDto,
    ) -> Result<College, AppError> {
        let mut college = store
            .find_college_by_id(id)
            .await?
            .ok_or(AppError::CollegeNotFound)?;

        if let Some(name) = dto.name {
            college.name = name;
        }
        if let Some(email_extensions) = dto.email_extensions {
            college.email_extensions = email_extensions;
        }
        college.updated_at = Utc::now();

        store.update_college(&college).await?;
        Ok(college)
    }

    #[instrument(skip(store))]
    pub async fn delete(store: &dyn Store, id: Uuid) -> Result<(), AppError> {
        if !store.delete_college(id).await? {
            return Err(AppError::CollegeNotFound);
        }
        Ok(())
    }
}
