//! File storage port for uploaded ID documents.
//!
//! The engine never touches bytes after storage; it receives back a public
//! URL and records that on the user. The local-disk adapter is the default
//! backend; object stores can be swapped in without changing business logic.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::utils::errors::AppError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to store file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Internal(anyhow::anyhow!(err))
    }
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist the bytes under a unique key derived from `file_name` and
    /// return the public URL.
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<String, StorageError>;
}

pub struct LocalFileStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalFileStorage {
    pub fn new(root: PathBuf, base_url: String) -> Self {
        Self { root, base_url }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<String, StorageError> {
        // Prefix with a UUID so concurrent uploads of the same name never
        // clobber each other.
        let key = format!("{}-{}", Uuid::new_v4(), sanitize(file_name));

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&key), content).await?;

        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}

fn sanitize(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Test double that keeps uploads in memory.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Default)]
pub struct MemoryFileStorage {
    files: std::sync::Mutex<Vec<(String, Vec<u8>)>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl FileStorage for MemoryFileStorage {
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<String, StorageError> {
        let key = format!("{}-{}", Uuid::new_v4(), sanitize(file_name));
        self.files
            .lock()
            .unwrap()
            .push((key.clone(), content.to_vec()));
        Ok(format!("http://files.test/{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_path_separators() {
        assert_eq!(sanitize("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize("id-card.png"), "id-card.png");
    }

    #[tokio::test]
    async fn test_memory_storage_returns_url() {
        let storage = MemoryFileStorage::new();
        let url = storage.store("card.png", b"bytes").await.unwrap();
        assert!(url.starts_with("http://files.test/"));
        assert!(url.ends_with("card.png"));
        assert_eq!(storage.stored_count(), 1);
    }
}
