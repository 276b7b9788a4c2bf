use super::ApiClient;
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::client::{LoginRequest, RegisterRequest};
use shared::models::AuthProfile;

impl ApiClient {
    /// `POST /api/auth/login`
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthProfile> {
        self.http.post(&["api", "auth", "login"], request).await
    }

    /// `POST /api/auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthProfile> {
        self.http.post(&["api", "auth", "register"], request).await
    }
}
