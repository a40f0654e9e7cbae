use std::env;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// SMTP settings for OTP delivery.
///
/// With `SMTP_ENABLED` unset, dispatch is skipped entirely. This keeps local
/// development and CI from needing a mail relay.
#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
}

impl EmailConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("SMTP_ENABLED")
            .map(|raw| raw.eq_ignore_ascii_case("true") || raw == "1")
            .unwrap_or(false);

        Self {
            enabled,
            smtp_host: env_or("SMTP_HOST", "localhost"),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(1025),
            smtp_username: env_or("SMTP_USERNAME", ""),
            smtp_password: env_or("SMTP_PASSWORD", ""),
            from_email: env_or("FROM_EMAIL", "otp@classyfyed.com"),
            from_name: env_or("FROM_NAME", "ClassyFYed OTP Service"),
        }
    }
}
