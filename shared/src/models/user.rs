//! User Model

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Client,
    Barber,
    Admin,
}

/// Signed-in user profile returned by login and register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProfile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub username: String,
    pub role: UserRole,
    /// Set for barber accounts
    #[serde(default)]
    pub barber_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Bearer token, when the backend issues one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Public profile of any account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    #[serde(default)]
    pub barber_id: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
