use std::env;

/// Token signing configuration.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds. Defaults to one hour.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let access_token_expiry = env::var("JWT_ACCESS_EXPIRY")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(3600);

        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry,
        }
    }
}
