//! User entity and role definitions.
//!
//! The user record is the unit the verification engine operates on: it
//! carries the pending OTP, the verification flag, and any manually reviewed
//! documents. Users are keyed by email and reference their college by
//! shortcode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Closed set of account roles.
///
/// Role strings from the wire deserialize into this enum; every gate matches
/// exhaustively, so an unknown role is rejected at the boundary rather than
/// compared against literals downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
    /// College-side reviewer, may approve manual verification for their
    /// institution.
    College,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
            Role::College => "college",
        }
    }

    /// Whether this role may approve manual verification and manage the
    /// college catalog.
    pub fn can_review(&self) -> bool {
        match self {
            Role::Admin | Role::College => true,
            Role::Student | Role::Teacher => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            "college" => Ok(Role::College),
            other => Err(format!("Invalid role: {other}")),
        }
    }
}

/// Documents attached to a manual verification request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VerificationData {
    pub id_card: Option<String>,
    pub teacher_id: Option<String>,
    pub proof_document: Option<String>,
    pub email_extension: Option<String>,
}

/// A registered account.
///
/// `register_otp` is non-null only between OTP issuance and
/// confirmation; `verified` is set either by a domain match at confirmation
/// time or by an admin/college reviewer approving `verification_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Shortcode of the declared college.
    pub college: String,
    pub verified: bool,
    pub verification_data: Option<VerificationData>,
    pub register_otp: Option<String>,
    pub last_otp: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Domain portion of the email, the substring between the first `@` and
    /// the next one (or the end). `None` when the address has no `@`.
    pub fn email_domain(&self) -> Option<&str> {
        self.email.split('@').nth(1)
    }
}

/// Public projection of a [`User`], safe to return from handlers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub college: String,
    pub verified: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            college: user.college.clone(),
            verified: user.verified,
        }
    }
}
