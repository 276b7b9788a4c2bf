//! Signed-in session
//!
//! A [`Session`] owns the API client and the signed-in profile. It changes
//! only through [`Session::sign_in`], [`Session::sign_up`] and
//! [`Session::sign_out`]; everything else reads it.

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::tasks::PollHandle;
use crate::watch::{PendingWatcher, ReservationWatcher};
use chrono::{DateTime, TimeZone, Utc};
use shared::BookingError;
use shared::booking::{self, Actor, SlotCandidate};
use shared::client::{LoginRequest, RegisterRequest};
use shared::models::{
    AuthProfile, NewReservation, Rating, Reservation, ReservationStatus, Slot, UserRole,
};
use std::sync::Arc;

/// Service details attached to a booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub service_name: String,
    pub service_duration_minutes: u32,
    pub notes: String,
}

#[derive(Debug)]
pub struct Session {
    config: ClientConfig,
    api: ApiClient,
    profile: Option<AuthProfile>,
}

impl Session {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let api = ApiClient::new(&config)?;
        Ok(Self {
            config,
            api,
            profile: None,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn profile(&self) -> Option<&AuthProfile> {
        self.profile.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.profile.is_some()
    }

    /// Actor for status transitions, from the profile's role
    pub fn actor(&self) -> Option<Actor> {
        self.profile.as_ref().map(|p| Actor::from(p.role))
    }

    /// Signed-in profile or [`ClientError::NotSignedIn`]
    pub fn require_profile(&self) -> ClientResult<&AuthProfile> {
        self.profile.as_ref().ok_or(ClientError::NotSignedIn)
    }

    fn require_barber_id(&self) -> ClientResult<&str> {
        let profile = self.require_profile()?;
        profile
            .barber_id
            .as_deref()
            .ok_or_else(|| ClientError::NotABarber(profile.username.clone()))
    }

    /// Install `profile`; without a token of its own the configured one applies
    fn establish(&mut self, profile: AuthProfile) -> &AuthProfile {
        let token = profile.token.clone().or_else(|| self.config.token.clone());
        self.api.set_token(token);
        tracing::info!(
            user_id = %profile.id,
            username = %profile.username,
            role = ?profile.role,
            "Signed in"
        );
        self.profile.insert(profile)
    }

    /// Log in; `role` asks the backend to check the account's role too
    pub async fn sign_in(
        &mut self,
        username: &str,
        password: &str,
        role: Option<UserRole>,
    ) -> ClientResult<&AuthProfile> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            role,
        };
        let profile = self.api.login(&request).await?;
        Ok(self.establish(profile))
    }

    /// Register and sign in as the new account
    pub async fn sign_up(&mut self, request: &RegisterRequest) -> ClientResult<&AuthProfile> {
        let profile = self.api.register(request).await?;
        Ok(self.establish(profile))
    }

    /// Forget the profile and token; returns the profile that was signed in
    pub fn sign_out(&mut self) -> Option<AuthProfile> {
        self.api.set_token(self.config.token.clone());
        let profile = self.profile.take();
        if let Some(p) = &profile {
            tracing::info!(user_id = %p.id, username = %p.username, "Signed out");
        }
        profile
    }

    // ========================================================================
    // Reservations
    // ========================================================================

    /// Status changes the signed-in user may offer for `reservation` at `now`
    ///
    /// The reservation is first moved along by the clock, so an approved
    /// appointment that already started offers COMPLETED to its barber.
    pub fn available_actions(
        &self,
        reservation: &Reservation,
        now: DateTime<Utc>,
    ) -> Vec<ReservationStatus> {
        match self.actor() {
            Some(actor) => {
                let current = booking::advance_by_clock(reservation, now);
                booking::allowed_transitions(current.status, actor)
            }
            None => Vec::new(),
        }
    }

    /// Move `reservation` to `target` as the signed-in user
    pub async fn set_status(
        &self,
        reservation: &Reservation,
        target: ReservationStatus,
    ) -> ClientResult<Reservation> {
        let actor = self.actor().ok_or(ClientError::NotSignedIn)?;
        self.api.change_status(reservation, target, actor).await
    }

    pub async fn cancel(&self, reservation: &Reservation) -> ClientResult<Reservation> {
        self.set_status(reservation, ReservationStatus::Cancelled).await
    }

    pub async fn approve(&self, reservation: &Reservation) -> ClientResult<Reservation> {
        self.set_status(reservation, ReservationStatus::Approved).await
    }

    pub async fn decline(&self, reservation: &Reservation) -> ClientResult<Reservation> {
        self.set_status(reservation, ReservationStatus::Declined).await
    }

    /// Finish an appointment whose slot has started by `now`
    pub async fn complete(
        &self,
        reservation: &Reservation,
        now: DateTime<Utc>,
    ) -> ClientResult<Reservation> {
        let current = booking::advance_by_clock(reservation, now);
        self.set_status(&current, ReservationStatus::Completed).await
    }

    /// Slots of `barber_id` the signed-in client can still book at `now`
    pub async fn open_slots(
        &self,
        barber_id: &str,
        now: DateTime<Utc>,
    ) -> ClientResult<Vec<Slot>> {
        let profile = self.require_profile()?;
        let (slots, mine) = tokio::try_join!(
            self.api.barber_slots(barber_id),
            self.api.client_reservations(&profile.id),
        )?;
        Ok(booking::bookable_slots(&slots, &mine, now))
    }

    /// Book `slot` for the signed-in client
    ///
    /// The barber's slots are fetched first; a slot that has started, was
    /// removed or is already held fails with
    /// [`BookingError::SlotUnavailable`] and nothing is sent.
    pub async fn book(
        &self,
        slot: &Slot,
        details: BookingDetails,
        now: DateTime<Utc>,
    ) -> ClientResult<Reservation> {
        let profile = self.require_profile()?;
        let unavailable = || {
            tracing::debug!(slot_id = %slot.id, barber_id = %slot.barber_id, "Slot no longer bookable");
            ClientError::from(BookingError::SlotUnavailable {
                slot_id: slot.id.clone(),
            })
        };
        if slot.start <= now {
            return Err(unavailable());
        }
        let open = self.open_slots(&slot.barber_id, now).await?;
        let slot = open.iter().find(|s| s.id == slot.id).ok_or_else(unavailable)?;
        let request = NewReservation {
            barber_id: slot.barber_id.clone(),
            client_id: profile.id.clone(),
            slot: slot.start,
            notes: details.notes,
            service_name: details.service_name,
            service_duration_minutes: details.service_duration_minutes,
        };
        let reservation = self.api.create_reservation(&request).await?;
        tracing::info!(reservation_id = %reservation.id, barber_id = %reservation.barber_id, "Reservation requested");
        Ok(reservation)
    }

    /// Reservations of the signed-in client
    pub async fn my_reservations(&self) -> ClientResult<Vec<Reservation>> {
        let profile = self.require_profile()?;
        self.api.client_reservations(&profile.id).await
    }

    /// Pending requests of the signed-in barber
    pub async fn pending_requests(&self) -> ClientResult<Vec<Reservation>> {
        let barber_id = self.require_barber_id()?;
        self.api.pending_reservations(barber_id).await
    }

    /// Full history of the signed-in barber
    pub async fn barber_history(&self) -> ClientResult<Vec<Reservation>> {
        let barber_id = self.require_barber_id()?;
        self.api.barber_history(barber_id).await
    }

    // ========================================================================
    // Slots
    // ========================================================================

    /// Publish a slot for the signed-in barber
    ///
    /// Past candidates fail before any request. Otherwise the barber's
    /// current slots are fetched and checked for overlap first.
    pub async fn publish_slot<Tz: TimeZone>(
        &self,
        start: DateTime<Utc>,
        duration_minutes: i64,
        now: &DateTime<Tz>,
    ) -> ClientResult<Slot> {
        let barber_id = self.require_barber_id()?;
        let candidate = SlotCandidate::with_duration(barber_id, start, duration_minutes)?;
        booking::validate_candidate(&[], &candidate, now)?;
        let existing = self.api.barber_slots(barber_id).await?;
        let slot = self.api.create_slot(&candidate, &existing, now).await?;
        tracing::info!(slot_id = %slot.id, start = %slot.start, "Slot published");
        Ok(slot)
    }

    // ========================================================================
    // Ratings
    // ========================================================================

    /// Rate a completed reservation of the signed-in client
    pub async fn rate(
        &self,
        reservation: &Reservation,
        value: u8,
        feedback: Option<String>,
    ) -> ClientResult<Rating> {
        self.require_profile()?;
        self.api.rate_reservation(reservation, value, feedback).await
    }

    // ========================================================================
    // Watchers
    // ========================================================================

    /// Poll the signed-in client's reservations into `watcher`
    pub fn watch_reservations(&self, watcher: &Arc<ReservationWatcher>) -> ClientResult<PollHandle> {
        let profile = self.require_profile()?;
        Ok(watcher.spawn(
            self.api.clone(),
            profile.id.clone(),
            self.config.poll_interval,
        ))
    }

    /// Poll the signed-in barber's pending requests into `watcher`
    pub fn watch_pending(&self, watcher: &Arc<PendingWatcher>) -> ClientResult<PollHandle> {
        let barber_id = self.require_barber_id()?;
        Ok(watcher.spawn(
            self.api.clone(),
            barber_id.to_string(),
            self.config.badge_poll_interval,
        ))
    }
}
