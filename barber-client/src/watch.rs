//! Notification watchers
//!
//! [`ReservationWatcher`] drives the client's "status changed" badge: each
//! fetched list is diffed against the snapshot the user last saw.
//! [`PendingWatcher`] drives the barber's pending-requests badge.
//!
//! Both accept results stamped with a sequence number and drop any result
//! older than the last one applied.

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::tasks::{LastApplied, PollHandle, PollTask, RequestSequencer};
use shared::booking::{self, StatusSnapshot};
use shared::models::Reservation;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Result of applying one fetched list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchUpdate {
    /// Unseen APPROVED/DECLINED changes
    pub badge: usize,
    /// Reservations that turned DECLINED since the previous poll
    pub newly_declined: Vec<String>,
    /// Reservations that turned COMPLETED since the previous poll
    pub newly_completed: Vec<String>,
}

#[derive(Debug, Default)]
struct ReservationState {
    seen: StatusSnapshot,
    latest: StatusSnapshot,
    badge: usize,
    reservations: Vec<Reservation>,
    applied: LastApplied,
}

/// Client-side reservation status watcher
#[derive(Debug, Default)]
pub struct ReservationWatcher {
    sequencer: RequestSequencer,
    state: Mutex<ReservationState>,
}

impl ReservationWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a snapshot persisted by an earlier session
    pub fn with_seen(seen: StatusSnapshot) -> Self {
        let watcher = Self::default();
        watcher.lock().seen = seen;
        watcher
    }

    fn lock(&self) -> MutexGuard<'_, ReservationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sequence number for the next fetch
    pub fn begin(&self) -> u64 {
        self.sequencer.next()
    }

    /// Apply a list fetched under `seq`; `None` when the result is stale
    pub fn apply(&self, seq: u64, reservations: Vec<Reservation>) -> Option<WatchUpdate> {
        let mut state = self.lock();
        if !state.applied.advance(seq) {
            tracing::debug!(seq, last = state.applied.get(), "Dropping stale reservation list");
            return None;
        }

        let badge = booking::diff(&state.seen, &reservations);
        let events = booking::diff(&state.latest, &reservations);

        state.latest = badge.snapshot;
        state.badge = badge.changed;
        state.reservations = reservations;

        Some(WatchUpdate {
            badge: badge.changed,
            newly_declined: events.newly_declined,
            newly_completed: events.newly_completed,
        })
    }

    /// Fetch the client's reservations and apply them
    pub async fn poll(&self, api: &ApiClient, client_id: &str) -> ClientResult<Option<WatchUpdate>> {
        let seq = self.begin();
        let reservations = api.client_reservations(client_id).await?;
        Ok(self.apply(seq, reservations))
    }

    pub fn badge(&self) -> usize {
        self.lock().badge
    }

    /// The user opened the list: latest becomes seen and the badge clears
    pub fn mark_seen(&self) {
        let mut state = self.lock();
        state.seen = state.latest.clone();
        state.badge = 0;
    }

    /// Snapshot to persist across sessions
    pub fn seen(&self) -> StatusSnapshot {
        self.lock().seen.clone()
    }

    /// [`Self::seen`] as JSON
    pub fn seen_json(&self) -> ClientResult<String> {
        Ok(self.lock().seen.to_json()?)
    }

    /// Restore from [`Self::seen_json`] output
    pub fn from_seen_json(json: &str) -> ClientResult<Self> {
        Ok(Self::with_seen(StatusSnapshot::from_json(json)?))
    }

    /// Last applied reservation list
    pub fn reservations(&self) -> Vec<Reservation> {
        self.lock().reservations.clone()
    }

    /// Poll `client_id`'s reservations every `interval`
    pub fn spawn(
        self: &Arc<Self>,
        api: ApiClient,
        client_id: String,
        interval: Duration,
    ) -> PollHandle {
        let watcher = self.clone();
        PollTask::new("reservation_watch", interval).spawn(move || {
            let watcher = watcher.clone();
            let api = api.clone();
            let client_id = client_id.clone();
            async move {
                match watcher.poll(&api, &client_id).await {
                    Ok(Some(update)) => log_update(&client_id, &update),
                    Ok(None) => {}
                    Err(e) => tracing::warn!(%client_id, error = %e, "Reservation poll failed"),
                }
            }
        })
    }
}

fn log_update(client_id: &str, update: &WatchUpdate) {
    for id in &update.newly_declined {
        tracing::info!(%client_id, reservation_id = %id, "Reservation declined");
    }
    for id in &update.newly_completed {
        tracing::info!(%client_id, reservation_id = %id, "Reservation completed, ready to rate");
    }
    if update.badge > 0 {
        tracing::debug!(%client_id, badge = update.badge, "Unseen status changes");
    }
}

#[derive(Debug, Default)]
struct PendingState {
    count: usize,
    acknowledged: usize,
    applied: LastApplied,
}

/// Barber-side pending request counter
#[derive(Debug, Default)]
pub struct PendingWatcher {
    sequencer: RequestSequencer,
    state: Mutex<PendingState>,
}

impl PendingWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PendingState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn begin(&self) -> u64 {
        self.sequencer.next()
    }

    /// Apply a pending count fetched under `seq`; returns the badge, or
    /// `None` when the result is stale
    pub fn apply(&self, seq: u64, count: usize) -> Option<usize> {
        let mut state = self.lock();
        if !state.applied.advance(seq) {
            tracing::debug!(seq, last = state.applied.get(), "Dropping stale pending count");
            return None;
        }
        state.count = count;
        Some(Self::badge_of(&state))
    }

    pub async fn poll(&self, api: &ApiClient, barber_id: &str) -> ClientResult<Option<usize>> {
        let seq = self.begin();
        let pending = api.pending_reservations(barber_id).await?;
        Ok(self.apply(seq, pending.len()))
    }

    fn badge_of(state: &PendingState) -> usize {
        if state.count != state.acknowledged {
            state.count
        } else {
            0
        }
    }

    /// Pending count, shown only while it differs from the acknowledged one
    pub fn badge(&self) -> usize {
        Self::badge_of(&self.lock())
    }

    pub fn count(&self) -> usize {
        self.lock().count
    }

    /// The barber opened the pending list
    pub fn acknowledge(&self) {
        let mut state = self.lock();
        state.acknowledged = state.count;
    }

    /// Poll `barber_id`'s pending requests every `interval`
    pub fn spawn(self: &Arc<Self>, api: ApiClient, barber_id: String, interval: Duration) -> PollHandle {
        let watcher = self.clone();
        PollTask::new("pending_watch", interval).spawn(move || {
            let watcher = watcher.clone();
            let api = api.clone();
            let barber_id = barber_id.clone();
            async move {
                match watcher.poll(&api, &barber_id).await {
                    Ok(Some(badge)) if badge > 0 => {
                        tracing::info!(%barber_id, pending = badge, "New pending requests");
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(%barber_id, error = %e, "Pending poll failed"),
                }
            }
        })
    }
}
