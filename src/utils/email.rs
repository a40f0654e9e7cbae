//! Outbound email port and SMTP adapter.
//!
//! Services depend on the [`Mailer`] trait; the production adapter sends
//! through `lettre` SMTP. Delivery is always awaited so failures surface to
//! the caller instead of being dropped after the response is written.

use std::collections::HashMap;

use async_trait::async_trait;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::{info, instrument};

use crate::config::email::EmailConfig;
use crate::utils::errors::AppError;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    Address(String),
    #[error("failed to deliver email: {0}")]
    Delivery(String),
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::EmailDelivery(err.to_string())
    }
}

/// A rendered outbound message.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Render a named template with `{{key}}` substitutions.
pub fn render_template(template_name: &str, params: &HashMap<&str, String>) -> MailMessage {
    let mut message = match template_name {
        "otp" => otp_template(),
        _ => generic_template(),
    };
    for (key, value) in params {
        let marker = format!("{{{{{key}}}}}");
        message.subject = message.subject.replace(&marker, value);
        message.text_body = message.text_body.replace(&marker, value);
        message.html_body = message.html_body.replace(&marker, value);
    }
    message
}

/// Convenience wrapper: the OTP email carrying a registration code.
pub fn otp_message(code: &str) -> MailMessage {
    let mut params = HashMap::new();
    params.insert("otp", code.to_string());
    render_template("otp", &params)
}

fn otp_template() -> MailMessage {
    MailMessage {
        subject: "Your OTP Code".to_string(),
        text_body: "Your ClassyFYed verification code is {{otp}}.\n\n\
                    Enter it within the app to confirm your email address.\n\
                    If you didn't request this code, you can ignore this email."
            .to_string(),
        html_body: r#"<!DOCTYPE html>
<html lang="en">
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif;">
    <h2 style="color: #333333;">ClassyFYed</h2>
    <p style="color: #666666;">Your verification code is:</p>
    <p style="font-size: 32px; font-weight: bold; letter-spacing: 4px;">{{otp}}</p>
    <p style="color: #666666; font-size: 14px;">
        If you didn't request this code, you can ignore this email.
    </p>
</body>
</html>"#
            .to_string(),
    }
}

fn generic_template() -> MailMessage {
    MailMessage {
        subject: "{{subject}}".to_string(),
        text_body: "{{body}}".to_string(),
        html_body: "<p>{{body}}</p>".to_string(),
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, message: MailMessage) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    async fn send(&self, to: &str, message: MailMessage) -> Result<(), MailError> {
        if !self.config.enabled {
            info!(to, "SMTP disabled, skipping email dispatch");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| MailError::Address(format!("from: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| MailError::Address(format!("to: {e}")))?)
            .subject(&message.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(message.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(message.html_body.clone()),
                    ),
            )
            .map_err(|e| MailError::Delivery(format!("failed to build email: {e}")))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| MailError::Delivery(format!("failed to create SMTP relay: {e}")))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| MailError::Delivery(format!("task join error: {e}")))?
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        Ok(())
    }
}

/// Test double that records every message instead of delivering it.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Default)]
pub struct RecordingMailer {
    sent: std::sync::Mutex<Vec<(String, MailMessage)>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> Option<(String, MailMessage)> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, message: MailMessage) -> Result<(), MailError> {
        self.sent.lock().unwrap().push((to.to_string(), message));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_message_substitutes_code() {
        let message = otp_message("123456");
        assert!(message.text_body.contains("123456"));
        assert!(message.html_body.contains("123456"));
        assert!(!message.html_body.contains("{{otp}}"));
    }

    #[tokio::test]
    async fn test_recording_mailer_captures_messages() {
        let mailer = RecordingMailer::new();
        mailer
            .send("a@mit.edu", otp_message("654321"))
            .await
            .unwrap();

        assert_eq!(mailer.sent_count(), 1);
        let (to, message) = mailer.last_sent().unwrap();
        assert_eq!(to, "a@mit.edu");
        assert!(message.text_body.contains("654321"));
    }
}
