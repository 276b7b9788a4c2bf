//! Reservation lifecycle
//!
//! ```text
//! PENDING ──barber──▶ APPROVED ──clock──▶ IN_PROGRESS ──clock | barber──▶ COMPLETED
//!    ├──barber──▶ DECLINED
//!    └──client──▶ CANCELLED
//! ```
//!
//! DECLINED, CANCELLED and COMPLETED are terminal. Every function here is
//! pure; persisting the new status is the backend's job.

use crate::error::{BookingError, BookingResult};
use crate::models::{Reservation, ReservationStatus, UserRole};
use chrono::{DateTime, Utc};
use std::fmt;

/// Who triggers a status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Client,
    Barber,
    Admin,
    /// Time-driven changes; no user involved
    System,
}

impl From<UserRole> for Actor {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Client => Self::Client,
            UserRole::Barber => Self::Barber,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Barber => write!(f, "barber"),
            Self::Admin => write!(f, "admin"),
            Self::System => write!(f, "system"),
        }
    }
}

/// Whether `actor` may move a reservation from `from` to `to`
pub fn can_transition(from: ReservationStatus, to: ReservationStatus, actor: Actor) -> bool {
    use crate::models::ReservationStatus::*;

    matches!(
        (from, to, actor),
        (Pending, Approved, Actor::Barber)
            | (Pending, Declined, Actor::Barber)
            | (Pending, Cancelled, Actor::Client)
            | (Approved, InProgress, Actor::System)
            | (InProgress, Completed, Actor::System | Actor::Barber)
    )
}

/// Targets `actor` may choose from `from`
///
/// Empty for terminal statuses. Callers use this to decide which actions
/// to offer a role.
pub fn allowed_transitions(from: ReservationStatus, actor: Actor) -> Vec<ReservationStatus> {
    ReservationStatus::ALL
        .into_iter()
        .filter(|to| can_transition(from, *to, actor))
        .collect()
}

/// Apply a status change, returning the updated reservation
pub fn transition(
    reservation: &Reservation,
    target: ReservationStatus,
    actor: Actor,
) -> BookingResult<Reservation> {
    if !can_transition(reservation.status, target, actor) {
        tracing::debug!(
            reservation_id = %reservation.id,
            from = %reservation.status,
            to = %target,
            actor = %actor,
            "Rejected status transition"
        );
        return Err(BookingError::InvalidTransition {
            from: reservation.status,
            to: target,
            actor,
        });
    }

    Ok(Reservation {
        status: target,
        ..reservation.clone()
    })
}

/// Status the clock implies next, if any
fn clock_step(reservation: &Reservation, now: DateTime<Utc>) -> Option<ReservationStatus> {
    match reservation.status {
        ReservationStatus::Approved if now >= reservation.slot => Some(ReservationStatus::InProgress),
        ReservationStatus::InProgress if now >= reservation.slot_end() => {
            Some(ReservationStatus::Completed)
        }
        _ => None,
    }
}

/// Apply time-driven transitions as of `now`
///
/// APPROVED enters IN_PROGRESS once the slot starts and COMPLETED once the
/// service window ends. PENDING reservations are left alone.
pub fn advance_by_clock(reservation: &Reservation, now: DateTime<Utc>) -> Reservation {
    let mut current = reservation.clone();
    while let Some(next) = clock_step(&current, now) {
        match transition(&current, next, Actor::System) {
            Ok(advanced) => current = advanced,
            Err(_) => break,
        }
    }
    current
}
