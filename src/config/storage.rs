use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directory where uploaded ID documents land.
    pub upload_dir: PathBuf,
    /// Public base URL under which stored files are served.
    pub public_base_url: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            public_base_url: env::var("UPLOAD_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000/uploads".to_string()),
        }
    }
}
