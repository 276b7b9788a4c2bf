use super::ApiClient;
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::{Barber, RatingSummary, UserProfile};

impl ApiClient {
    /// `GET /api/users/barbers`
    pub async fn barbers(&self) -> ClientResult<Vec<Barber>> {
        self.http.get(&["api", "users", "barbers"]).await
    }

    /// `GET /api/users/{id}`; the backend also matches a username
    pub async fn user(&self, id: &str) -> ClientResult<UserProfile> {
        self.http.get(&["api", "users", id]).await
    }

    /// `GET /api/barbers/{barberId}/rating-summary`
    pub async fn barber_rating_summary(&self, barber_id: &str) -> ClientResult<RatingSummary> {
        self.http
            .get(&["api", "barbers", barber_id, "rating-summary"])
            .await
    }
}
