//! In-memory store adapter used by tests.
//!
//! Behaves like the Postgres adapter over plain vectors guarded by a mutex.
//! Available only with the `test-utils` feature.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::colleges::model::College;
use crate::modules::products::model::Product;
use crate::modules::users::model::User;

use super::{CollegeStore, ProductStore, StoreError, UserStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    colleges: Mutex<Vec<College>>,
    products: Mutex<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a user record, for asserting on persisted state.
    pub fn user_snapshot(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned()
    }

    /// Seed a college directly, bypassing the HTTP surface.
    pub fn seed_college(&self, college: College) {
        self.colleges.lock().unwrap().push(college);
    }

    /// Seed a user directly, bypassing registration.
    pub fn seed_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn find_user_by_email_and_otp(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email && user.register_otp.as_deref() == Some(code))
            .cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "users.email: {}",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|existing| existing.id == user.id) {
            *existing = user.clone();
        }
        Ok(())
    }
}

#[async_trait]
impl CollegeStore for MemoryStore {
    async fn find_college_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<College>, StoreError> {
        Ok(self
            .colleges
            .lock()
            .unwrap()
            .iter()
            .find(|college| college.short_code == short_code)
            .cloned())
    }

    async fn find_college_by_id(&self, id: Uuid) -> Result<Option<College>, StoreError> {
        Ok(self
            .colleges
            .lock()
            .unwrap()
            .iter()
            .find(|college| college.id == id)
            .cloned())
    }

    async fn list_colleges(&self, search: Option<&str>) -> Result<Vec<College>, StoreError> {
        let colleges = self.colleges.lock().unwrap();
        let mut result: Vec<College> = match search {
            Some(needle) => {
                let needle = needle.to_lowercase();
                colleges
                    .iter()
                    .filter(|college| college.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => colleges.clone(),
        };
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn insert_college(&self, college: &College) -> Result<(), StoreError> {
        let mut colleges = self.colleges.lock().unwrap();
        if colleges
            .iter()
            .any(|existing| existing.short_code == college.short_code)
        {
            return Err(StoreError::Conflict(format!(
                "colleges.short_code: {}",
                college.short_code
            )));
        }
        colleges.push(college.clone());
        Ok(())
    }

    async fn update_college(&self, college: &College) -> Result<(), StoreError> {
        let mut colleges = self.colleges.lock().unwrap();
        if let Some(existing) = colleges
            .iter_mut()
            .find(|existing| existing.id == college.id)
        {
            *existing = college.clone();
        }
        Ok(())
    }

    async fn delete_college(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut colleges = self.colleges.lock().unwrap();
        let before = colleges.len();
        colleges.retain(|college| college.id != id);
        Ok(colleges.len() < before)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|product| product.id == id)
            .cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.lock().unwrap().clone())
    }

    async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<(), StoreError> {
        let mut products = self.products.lock().unwrap();
        if let Some(existing) = products
            .iter_mut()
            .find(|existing| existing.id == product.id)
        {
            *existing = product.clone();
        }
        Ok(())
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|product| product.id != id);
        Ok(products.len() < before)
    }
}
