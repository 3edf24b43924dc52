//! Enrollment domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_USER_ID;
use crate::errors::{Result, ValidationError};
use crate::Error;

/// A stored credential. `access_token` holds the sealed form and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEnrollment {
    pub id: i32,
    pub enrollment_id: String,
    pub user_id: String,
    #[serde(skip_serializing, default)]
    pub access_token: String,
    pub institution_name: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub last_synced: Option<NaiveDateTime>,
}

/// Payload posted by the enrollment widget once the user links an institution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    pub access_token: Option<String>,
    pub enrollment_id: Option<String>,
    pub user_id: Option<String>,
    pub institution_name: Option<String>,
}

/// A validated enrollment ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnrollment {
    pub enrollment_id: String,
    pub user_id: String,
    pub access_token: String,
    pub institution_name: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        ))),
    }
}

impl EnrollmentRequest {
    /// Checks required fields and fills in the default user.
    pub fn validate(self) -> Result<NewEnrollment> {
        let access_token = required(self.access_token, "access_token")?;
        let enrollment_id = required(self.enrollment_id, "enrollment_id")?;
        let user_id = self
            .user_id
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
        let institution_name = self
            .institution_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(NewEnrollment {
            enrollment_id,
            user_id,
            access_token,
            institution_name,
        })
    }
}
