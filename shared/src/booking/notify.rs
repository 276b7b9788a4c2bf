//! Reservation change notifications
//!
//! Compares the statuses a user last saw against a freshly fetched list to
//! count unseen approvals and declines without alerting twice.

use crate::models::{Reservation, ReservationStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reservation id -> last observed status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSnapshot(BTreeMap<String, ReservationStatus>);

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reservations(reservations: &[Reservation]) -> Self {
        reservations
            .iter()
            .map(|r| (r.id.clone(), r.status))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<ReservationStatus> {
        self.0.get(id).copied()
    }

    pub fn insert(&mut self, id: impl Into<String>, status: ReservationStatus) {
        self.0.insert(id.into(), status);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ReservationStatus)> {
        self.0.iter().map(|(id, status)| (id.as_str(), *status))
    }

    /// Serialize for storage between sessions
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restore a stored snapshot; unknown statuses are rejected
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FromIterator<(String, ReservationStatus)> for StatusSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, ReservationStatus)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of comparing a snapshot with the current list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusDiff {
    /// Reservations now APPROVED or DECLINED whose status differs from the snapshot
    pub changed: usize,
    /// Snapshot of the current list, to compare against next time
    pub snapshot: StatusSnapshot,
    /// Known reservations that became DECLINED
    pub newly_declined: Vec<String>,
    /// Known reservations that became COMPLETED
    pub newly_completed: Vec<String>,
}

/// Compare `previous` with `current`
///
/// A reservation missing from `previous` counts towards `changed` when it
/// is already APPROVED or DECLINED, but is never reported as newly
/// declined or completed.
pub fn diff(previous: &StatusSnapshot, current: &[Reservation]) -> StatusDiff {
    let mut out = StatusDiff {
        snapshot: StatusSnapshot::from_reservations(current),
        ..StatusDiff::default()
    };

    for reservation in current {
        let before = previous.get(&reservation.id);
        let now = reservation.status;
        if before == Some(now) {
            continue;
        }

        if matches!(now, ReservationStatus::Approved | ReservationStatus::Declined) {
            out.changed += 1;
        }
        if before.is_some() {
            match now {
                ReservationStatus::Declined => out.newly_declined.push(reservation.id.clone()),
                ReservationStatus::Completed => out.newly_completed.push(reservation.id.clone()),
                _ => {}
            }
        }
    }

    out
}
