//! College catalog models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A registered college.
///
/// `email_extensions` is the list of email domains accepted as proof of
/// affiliation; the verification engine consults it read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct College {
    pub id: Uuid,
    pub name: String,
    pub short_code: String,
    pub email_extensions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl College {
    /// Whether the given address carries a domain on this college's accepted
    /// list. Matching is a case-insensitive comparison of the whole domain,
    /// never a suffix match; an address without an `@` never matches.
    pub fn accepts_email(&self, email: &str) -> bool {
        let Some(domain) = email.split('@').nth(1) else {
            return false;
        };
        self.email_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(domain))
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCollegeDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub short_code: String,
    #[serde(default)]
    pub email_extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCollegeDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub email_extensions: Option<Vec<String>>,
}

/// Query parameters for listing colleges.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CollegeFilterParams {
    /// Case-insensitive substring match on the college name.
    pub search: Option<String>,
}
