//! Shared application state.
//!
//! Every collaborator the engine talks to (store, mailer, file storage) is
//! constructed once here and injected as a trait object; handlers and
//! services never reach for global state.

use std::sync::Arc;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::email::EmailConfig;
use crate::config::jwt::JwtConfig;
use crate::config::storage::StorageConfig;
use crate::store::{PgStore, Store};
use crate::utils::email::{Mailer, SmtpMailer};
use crate::utils::file_storage::{FileStorage, LocalFileStorage};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub mailer: Arc<dyn Mailer>,
    pub files: Arc<dyn FileStorage>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    let storage_config = StorageConfig::from_env();

    AppState {
        store: Arc::new(PgStore::new(init_db_pool().await)),
        mailer: Arc::new(SmtpMailer::new(EmailConfig::from_env())),
        files: Arc::new(LocalFileStorage::new(
            storage_config.upload_dir,
            storage_config.public_base_url,
        )),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
