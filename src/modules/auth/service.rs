//! Registration, OTP lifecycle, and login.
//!
//! Together with [`crate::modules::verification`] this implements the
//! per-user verification state machine: register → OTP issuance → OTP
//! confirmation → domain decision, with login gated on the outcome.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::store::{Store, StoreError};
use crate::utils::email::{Mailer, otp_message};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::otp::{cooldown_remaining, generate_otp};
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    ConfirmOtpResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto,
    VerifyOtpRequest,
};

pub struct AuthService;

impl AuthService {
    /// Create the account unverified, with a registration code already
    /// pending, and dispatch the OTP email. Dispatch is awaited so delivery
    /// failures reach the caller.
    #[instrument(skip(store, mailer, dto), fields(email = %dto.email))]
    pub async fn register(
        store: &dyn Store,
        mailer: &dyn Mailer,
        dto: RegisterRequestDto,
    ) -> Result<MessageResponse, AppError> {
        if store.find_user_by_email(&dto.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(&dto.password)?;
        let code = generate_otp();
        let now = Utc::now();

        let user = User {
            id: Uuid::new_v4(),
            email: dto.email,
            password_hash,
            first_name: dto.first_name,
            last_name: dto.last_name,
            role: dto.role,
            college: dto.college,
            verified: false,
            verification_data: None,
            register_otp: Some(code.clone()),
            last_otp: Some(now),
            created_at: now,
            updated_at: now,
        };

        store.insert_user(&user).await.map_err(|err| match err {
            // Lost a race with a concurrent registration for the same email.
            StoreError::Conflict(_) => AppError::DuplicateEmail,
            other => other.into(),
        })?;

        mailer.send(&user.email, otp_message(&code)).await?;

        info!(user_id = %user.id, "user registered, OTP dispatched");

        Ok(MessageResponse::new(
            "User registered. Check your email for the verification code.",
        ))
    }

    /// Issue a fresh code unless the 60-second cooldown is still running.
    /// Inside the window nothing changes: no new code, no email, and the
    /// timer keeps its original deadline, so retries are idempotent.
    #[instrument(skip(store, mailer))]
    pub async fn issue_otp(
        store: &dyn Store,
        mailer: &dyn Mailer,
        email: &str,
    ) -> Result<MessageResponse, AppError> {
        let mut user = store
            .find_user_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let now = Utc::now();
        if let Some(retry_after_secs) = cooldown_remaining(user.last_otp, now) {
            return Err(AppError::OtpCooldown { retry_after_secs });
        }

        let code = generate_otp();
        user.register_otp = Some(code.clone());
        user.last_otp = Some(now);
        user.updated_at = now;
        store.update_user(&user).await?;

        mailer.send(&user.email, otp_message(&code)).await?;

        Ok(MessageResponse::new("OTP sent successfully"))
    }

    /// Confirm the code and run the domain decision.
    ///
    /// The lookup matches on the (email, code) pair exactly; a stale or
    /// foreign code leaves the stored state untouched. On a match the code is
    /// consumed in both branches, and domain membership in the declared
    /// college's extension list is the sole automatic verification signal.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn confirm_otp(
        store: &dyn Store,
        dto: VerifyOtpRequest,
    ) -> Result<ConfirmOtpResponse, AppError> {
        let mut user = store
            .find_user_by_email_and_otp(&dto.email, &dto.otp)
            .await?
            .ok_or(AppError::InvalidOtp)?;

        let college = store
            .find_college_by_short_code(&user.college)
            .await?
            .ok_or(AppError::CollegeNotFound)?;

        let domain_matched = college.accepts_email(&user.email);

        user.verified = domain_matched;
        user.register_otp = None;
        user.last_otp = None;
        user.updated_at = Utc::now();
        store.update_user(&user).await?;

        info!(user_id = %user.id, verified = domain_matched, "OTP confirmed");

        if domain_matched {
            Ok(ConfirmOtpResponse {
                message: "Email verified. No further action needed.".to_string(),
                success: true,
                verified: true,
                id_card: false,
            })
        } else {
            Ok(ConfirmOtpResponse {
                message: "Email confirmed, but the domain is not recognized by your college. \
                          Please upload your ID card for manual review."
                    .to_string(),
                success: true,
                verified: false,
                id_card: true,
            })
        }
    }

    /// Existence is checked first, then verification status, then the
    /// credential, so an unknown email reports `UserNotFound` and an
    /// unverified account is rejected before any password comparison.
    #[instrument(skip(store, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        store: &dyn Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = store
            .find_user_by_email(&dto.email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.verified {
            return Err(AppError::UserNotVerified);
        }

        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = create_access_token(user.id, user.role, jwt_config)?;

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            success: true,
            token,
            user: (&user).into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::colleges::model::College;
    use crate::modules::users::model::Role;
    use crate::store::UserStore;
    use crate::store::memory::MemoryStore;
    use crate::utils::email::RecordingMailer;
    use chrono::Duration;

    fn mit() -> College {
        let now = Utc::now();
        College {
            id: Uuid::new_v4(),
            name: "Massachusetts Institute of Technology".to_string(),
            short_code: "MIT".to_string(),
            email_extensions: vec!["mit.edu".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    fn register_dto(email: &str) -> RegisterRequestDto {
        RegisterRequestDto {
            email: email.to_string(),
            password: "hunter2hunter2".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Role::Student,
            college: "MIT".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_unverified_user_with_pending_otp() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        store.seed_college(mit());

        AuthService::register(&store, &mailer, register_dto("a@mit.edu"))
            .await
            .unwrap();

        let user = store.user_snapshot("a@mit.edu").unwrap();
        assert!(!user.verified);
        assert!(user.register_otp.is_some());
        assert!(user.last_otp.is_some());
        assert_ne!(user.password_hash, "hunter2hunter2");
        assert_eq!(mailer.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();

        AuthService::register(&store, &mailer, register_dto("a@mit.edu"))
            .await
            .unwrap();
        let result = AuthService::register(&store, &mailer, register_dto("a@mit.edu")).await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
        assert_eq!(mailer.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_issue_otp_within_cooldown_changes_nothing() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        AuthService::register(&store, &mailer, register_dto("a@mit.edu"))
            .await
            .unwrap();

        let before = store.user_snapshot("a@mit.edu").unwrap();
        let result = AuthService::issue_otp(&store, &mailer, "a@mit.edu").await;

        assert!(matches!(result, Err(AppError::OtpCooldown { .. })));
        let after = store.user_snapshot("a@mit.edu").unwrap();
        assert_eq!(after.register_otp, before.register_otp);
        assert_eq!(after.last_otp, before.last_otp);
        // Only the registration email went out.
        assert_eq!(mailer.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_issue_otp_after_cooldown_rotates_code() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        AuthService::register(&store, &mailer, register_dto("a@mit.edu"))
            .await
            .unwrap();

        // Age the previous issuance past the cooldown window.
        let mut user = store.user_snapshot("a@mit.edu").unwrap();
        user.last_otp = Some(Utc::now() - Duration::seconds(120));
        store.update_user(&user).await.unwrap();

        AuthService::issue_otp(&store, &mailer, "a@mit.edu")
            .await
            .unwrap();

        let after = store.user_snapshot("a@mit.edu").unwrap();
        assert!(after.register_otp.is_some());
        assert!(after.last_otp.unwrap() > Utc::now() - Duration::seconds(5));
        assert_eq!(mailer.sent_count(), 2);
    }

    #[tokio::test]
    async fn test_issue_otp_unknown_user() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();

        let result = AuthService::issue_otp(&store, &mailer, "ghost@mit.edu").await;
        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_confirm_otp_wrong_code_leaves_state_unchanged() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        store.seed_college(mit());
        AuthService::register(&store, &mailer, register_dto("a@mit.edu"))
            .await
            .unwrap();

        let result = AuthService::confirm_otp(
            &store,
            VerifyOtpRequest {
                email: "a@mit.edu".to_string(),
                otp: "000000".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidOtp)));
        let user = store.user_snapshot("a@mit.edu").unwrap();
        assert!(!user.verified);
        assert!(user.register_otp.is_some());
    }

    #[tokio::test]
    async fn test_confirm_otp_matching_domain_verifies() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        store.seed_college(mit());
        AuthService::register(&store, &mailer, register_dto("a@mit.edu"))
            .await
            .unwrap();

        let code = store
            .user_snapshot("a@mit.edu")
            .unwrap()
            .register_otp
            .unwrap();
        let response = AuthService::confirm_otp(
            &store,
            VerifyOtpRequest {
                email: "a@mit.edu".to_string(),
                otp: code,
            },
        )
        .await
        .unwrap();

        assert!(response.verified);
        assert!(!response.id_card);
        let user = store.user_snapshot("a@mit.edu").unwrap();
        assert!(user.verified);
        assert!(user.register_otp.is_none());
        assert!(user.last_otp.is_none());
    }

    #[tokio::test]
    async fn test_confirm_otp_foreign_domain_requests_id_card() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        store.seed_college(mit());
        AuthService::register(&store, &mailer, register_dto("a@gmail.com"))
            .await
            .unwrap();

        let code = store
            .user_snapshot("a@gmail.com")
            .unwrap()
            .register_otp
            .unwrap();
        let response = AuthService::confirm_otp(
            &store,
            VerifyOtpRequest {
                email: "a@gmail.com".to_string(),
                otp: code,
            },
        )
        .await
        .unwrap();

        assert!(!response.verified);
        assert!(response.id_card);
        let user = store.user_snapshot("a@gmail.com").unwrap();
        assert!(!user.verified);
        assert!(user.register_otp.is_none());
    }

    #[tokio::test]
    async fn test_confirm_otp_unknown_college() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        // No college seeded for the MIT shortcode.
        AuthService::register(&store, &mailer, register_dto("a@mit.edu"))
            .await
            .unwrap();

        let code = store
            .user_snapshot("a@mit.edu")
            .unwrap()
            .register_otp
            .unwrap();
        let result = AuthService::confirm_otp(
            &store,
            VerifyOtpRequest {
                email: "a@mit.edu".to_string(),
                otp: code,
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::CollegeNotFound)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_distinct() {
        let store = MemoryStore::new();
        let jwt = JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        };

        let result = AuthService::login(
            &store,
            LoginRequest {
                email: "ghost@mit.edu".to_string(),
                password: "whatever".to_string(),
            },
            &jwt,
        )
        .await;

        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_login_unverified_rejected_before_password_check() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        AuthService::register(&store, &mailer, register_dto("a@mit.edu"))
            .await
            .unwrap();
        let jwt = JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        };

        // Correct password, but the account is unverified.
        let result = AuthService::login(
            &store,
            LoginRequest {
                email: "a@mit.edu".to_string(),
                password: "hunter2hunter2".to_string(),
            },
            &jwt,
        )
        .await;

        assert!(matches!(result, Err(AppError::UserNotVerified)));
    }

    #[tokio::test]
    async fn test_login_verified_user_gets_token() {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        store.seed_college(mit());
        AuthService::register(&store, &mailer, register_dto("a@mit.edu"))
            .await
            .unwrap();

        let code = store
            .user_snapshot("a@mit.edu")
            .unwrap()
            .register_otp
            .unwrap();
        AuthService::confirm_otp(
            &store,
            VerifyOtpRequest {
                email: "a@mit.edu".to_string(),
                otp: code,
            },
        )
        .await
        .unwrap();

        let jwt = JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        };
        let response = AuthService::login(
            &store,
            LoginRequest {
                email: "a@mit.edu".to_string(),
                password: "hunter2hunter2".to_string(),
            },
            &jwt,
        )
        .await
        .unwrap();

        assert!(!response.token.is_empty());
        assert!(response.user.verified);

        let wrong = AuthService::login(
            &store,
            LoginRequest {
                email: "a@mit.edu".to_string(),
                password: "wrong-password".to_string(),
            },
            &jwt,
        )
        .await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
    }
}
