//! Manual verification override and the ID upload path.
//!
//! The route serving [`VerificationService::manual_verify`] is already
//! role-gated, but the engine re-checks the actor itself: the operation is
//! reachable at the contract level and must deny non-privileged callers on
//! its own.

use chrono::Utc;
use tracing::{info, instrument};

use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;

use super::model::{ManualVerifyRequest, ManualVerifyResponse, UploadIdResponse};

pub struct VerificationService;

impl VerificationService {
    /// Approve a user who failed the automatic domain check.
    ///
    /// The domain check is recomputed first: if the declared college's
    /// extension list has changed and the email now matches, the user is
    /// verified automatically and the override payload is ignored. Only when
    /// the domain still fails does the privileged path run.
    #[instrument(skip(store, dto), fields(target = %dto.user_id, actor_role = %actor_role))]
    pub async fn manual_verify(
        store: &dyn Store,
        actor_role: Role,
        dto: ManualVerifyRequest,
    ) -> Result<ManualVerifyResponse, AppError> {
        let mut user = store
            .find_user_by_id(dto.user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let college = store
            .find_college_by_short_code(&user.college)
            .await?
            .ok_or(AppError::CollegeNotFound)?;

        if college.accepts_email(&user.email) {
            user.verified = true;
            user.updated_at = Utc::now();
            store.update_user(&user).await?;

            info!(user_id = %user.id, "verified via email domain");
            return Ok(ManualVerifyResponse {
                message: "User verified via email domain".to_string(),
                success: true,
                verified: true,
            });
        }

        if !actor_role.can_review() {
            return Err(AppError::forbidden(
                "Manual verification requires an admin or college reviewer",
            ));
        }

        user.verification_data = Some(dto.verification_data);
        user.verified = true;
        user.updated_at = Utc::now();
        store.update_user(&user).await?;

        info!(user_id = %user.id, "manually verified");
        Ok(ManualVerifyResponse {
            message: "User manually verified".to_string(),
            success: true,
            verified: true,
        })
    }

    /// Record an already-stored ID card URL on the user.
    ///
    /// Always re-enters the pending-review state: the declared college is
    /// replaced and `verified` drops to false even if the user was verified
    /// before, since changing college invalidates prior verification.
    /// Repeated uploads overwrite the URL; the latest one wins.
    #[instrument(skip(store, id_card_url))]
    pub async fn record_id_upload(
        store: &dyn Store,
        email: &str,
        college: &str,
        id_card_url: &str,
    ) -> Result<UploadIdResponse, AppError> {
        let mut user = store
            .find_user_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        user.college = college.to_string();
        user.verification_data
            .get_or_insert_with(Default::default)
            .id_card = Some(id_card_url.to_string());
        user.verified = false;
        user.updated_at = Utc::now();
        store.update_user(&user).await?;

        Ok(UploadIdResponse {
            message: "ID card uploaded. Please wait for manual verification.".to_string(),
            success: true,
            id_card_url: id_card_url.to_string(),
        })
    }
}
