use super::ApiClient;
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::booking;
use shared::models::{NewRating, Rating, RatingAverage, RatingReply, Reservation};

impl ApiClient {
    /// `POST /api/ratings` without local checks
    pub async fn create_rating(&self, rating: &NewRating) -> ClientResult<Rating> {
        self.http.post(&["api", "ratings"], rating).await
    }

    /// Rate a completed reservation once
    ///
    /// Value and status are checked before anything is sent; the existing
    /// rating is then looked up so a second rating is refused locally.
    pub async fn rate_reservation(
        &self,
        reservation: &Reservation,
        value: u8,
        feedback: Option<String>,
    ) -> ClientResult<Rating> {
        booking::check_rating(reservation, value, None)?;
        let existing = self
            .my_rating(&reservation.id, &reservation.client_id)
            .await?;
        let payload = booking::prepare_rating(reservation, value, feedback, existing.as_ref())?;
        self.create_rating(&payload).await
    }

    /// `GET /api/ratings/barber/{barberId}`
    pub async fn barber_ratings(&self, barber_id: &str) -> ClientResult<Vec<Rating>> {
        self.http.get(&["api", "ratings", "barber", barber_id]).await
    }

    /// `GET /api/ratings/barber/{barberId}/average`
    pub async fn barber_average(&self, barber_id: &str) -> ClientResult<RatingAverage> {
        self.http
            .get(&["api", "ratings", "barber", barber_id, "average"])
            .await
    }

    /// `GET /api/ratings/client/{clientId}`
    pub async fn client_ratings(&self, client_id: &str) -> ClientResult<Vec<Rating>> {
        self.http.get(&["api", "ratings", "client", client_id]).await
    }

    /// The client's rating of a reservation; `None` when there is none (204)
    pub async fn my_rating(
        &self,
        reservation_id: &str,
        client_id: &str,
    ) -> ClientResult<Option<Rating>> {
        self.http
            .get_optional(
                &["api", "ratings", "reservation", reservation_id, "mine"],
                &[("clientId", client_id)],
            )
            .await
    }

    /// `POST /api/ratings/{id}/reply`
    pub async fn reply_to_rating(&self, rating_id: &str, reply: &str) -> ClientResult<Rating> {
        let body = RatingReply {
            reply: reply.to_string(),
        };
        self.http
            .post(&["api", "ratings", rating_id, "reply"], &body)
            .await
    }
}
