use super::ApiClient;
use crate::error::ClientResult;
use crate::http::HttpClient;
use chrono::{DateTime, TimeZone};
use shared::booking::{self, SlotCandidate};
use shared::models::Slot;

impl ApiClient {
    /// Validate `candidate` against `existing` and the clock, then `POST /api/slots`
    ///
    /// `existing` is normally the barber's current slot list. Past and
    /// overlapping candidates are rejected without a request.
    pub async fn create_slot<Tz: TimeZone>(
        &self,
        candidate: &SlotCandidate,
        existing: &[Slot],
        now: &DateTime<Tz>,
    ) -> ClientResult<Slot> {
        booking::validate_candidate(existing, candidate, now)?;
        let request = candidate.to_request();
        self.http.post(&["api", "slots"], &request).await
    }

    /// `GET /api/slots/barber/{barberId}`
    pub async fn barber_slots(&self, barber_id: &str) -> ClientResult<Vec<Slot>> {
        self.http.get(&["api", "slots", "barber", barber_id]).await
    }

    /// `DELETE /api/slots/{id}`, returning the backend's confirmation text
    pub async fn delete_slot(&self, id: &str) -> ClientResult<String> {
        self.http.delete_text(&["api", "slots", id]).await
    }
}
