use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::users::model::VerificationData;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ManualVerifyRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub verification_data: VerificationData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManualVerifyResponse {
    pub message: String,
    pub success: bool,
    pub verified: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadIdResponse {
    pub message: String,
    pub success: bool,
    /// Public URL of the stored ID card.
    pub id_card_url: String,
}
