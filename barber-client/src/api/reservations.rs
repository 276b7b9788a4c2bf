use super::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use shared::booking::{self, Actor};
use shared::models::{NewReservation, Reservation, ReservationStatus, StatusUpdate};

impl ApiClient {
    /// `POST /api/reservations`
    pub async fn create_reservation(&self, reservation: &NewReservation) -> ClientResult<Reservation> {
        self.http.post(&["api", "reservations"], reservation).await
    }

    /// `PUT /api/reservations/{id}/status` without a local check
    pub async fn update_reservation_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> ClientResult<Reservation> {
        self.http
            .put(&["api", "reservations", id, "status"], &StatusUpdate { status })
            .await
    }

    /// Move `reservation` to `target` on behalf of `actor`
    ///
    /// Transitions the actor may not perform fail with
    /// [`BookingError::InvalidTransition`](shared::BookingError) and send nothing.
    pub async fn change_status(
        &self,
        reservation: &Reservation,
        target: ReservationStatus,
        actor: Actor,
    ) -> ClientResult<Reservation> {
        booking::transition(reservation, target, actor)?;
        let updated = self.update_reservation_status(&reservation.id, target).await?;
        tracing::debug!(
            reservation_id = %reservation.id,
            from = %reservation.status,
            to = %updated.status,
            %actor,
            "Reservation status changed"
        );
        Ok(updated)
    }

    /// Client cancellation of a PENDING reservation
    pub async fn cancel_reservation(&self, reservation: &Reservation) -> ClientResult<Reservation> {
        self.change_status(reservation, ReservationStatus::Cancelled, Actor::Client)
            .await
    }

    /// `GET /api/reservations/client/{clientId}`
    pub async fn client_reservations(&self, client_id: &str) -> ClientResult<Vec<Reservation>> {
        self.http
            .get(&["api", "reservations", "client", client_id])
            .await
    }

    /// `GET /api/reservations/barber/{barberId}/pending`
    pub async fn pending_reservations(&self, barber_id: &str) -> ClientResult<Vec<Reservation>> {
        self.http
            .get(&["api", "reservations", "barber", barber_id, "pending"])
            .await
    }

    /// `GET /api/reservations/barber/{barberId}/all`
    pub async fn barber_reservations(&self, barber_id: &str) -> ClientResult<Vec<Reservation>> {
        self.http
            .get(&["api", "reservations", "barber", barber_id, "all"])
            .await
    }

    /// Active and archived reservations of a barber
    ///
    /// Uses `.../all-merged`; backends without it answer 404 and the
    /// active-only `.../all` list is returned instead.
    pub async fn barber_history(&self, barber_id: &str) -> ClientResult<Vec<Reservation>> {
        match self
            .http
            .get(&["api", "reservations", "barber", barber_id, "all-merged"])
            .await
        {
            Err(ClientError::NotFound(_)) => {
                tracing::debug!(%barber_id, "all-merged unavailable, falling back to all");
                self.barber_reservations(barber_id).await
            }
            other => other,
        }
    }

    /// `DELETE /api/reservations/{id}`
    pub async fn delete_reservation(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&["api", "reservations", id]).await
    }
}
