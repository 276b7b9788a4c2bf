//! Client-related types shared with the booking backend
//!
//! Auth request DTOs. The response side is [`AuthProfile`].
//!
//! [`AuthProfile`]: crate::models::AuthProfile

use crate::models::UserRole;
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Optional role check performed by the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Register request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barber_id: Option<String>,
}

impl RegisterRequest {
    pub fn client(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            role: UserRole::Client,
            barber_id: None,
        }
    }

    pub fn barber(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        barber_id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            role: UserRole::Barber,
            barber_id: Some(barber_id.into()),
        }
    }
}
