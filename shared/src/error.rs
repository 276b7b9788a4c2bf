//! Error types for the booking domain
//!
//! Local validation failures. These are raised before any request leaves
//! the client, so the user can correct the input and retry.

use crate::booking::Actor;
use crate::models::ReservationStatus;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Booking domain error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    /// Status change not reachable from the current state, or not allowed for the actor
    #[error("Cannot move reservation from {from} to {to} as {actor}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
        actor: Actor,
    },

    /// Slot date lies before today
    #[error("Date cannot be in the past: {date}")]
    PastDate { date: NaiveDate },

    /// Slot start lies before now
    #[error("Time cannot be in the past: {start}")]
    PastTime { start: DateTime<Utc> },

    /// Candidate interval intersects an existing slot of the same barber
    #[error("Slot {start} - {end} overlaps existing slot {existing_id}")]
    Overlap {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        existing_id: String,
    },

    /// Slot interval is empty, inverted or out of range
    #[error("Slot end must be after start")]
    InvalidSlot,

    /// Slot already started, was removed or is held by another reservation
    #[error("Slot {slot_id} is no longer available")]
    SlotUnavailable { slot_id: String },

    /// Unknown status string
    #[error("Unknown reservation status: {0}")]
    InvalidStatus(String),

    /// Rating value outside 1..=5
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// Reservation has not reached COMPLETED
    #[error("You can only rate a completed reservation (status: {0})")]
    RatingNotAllowed(ReservationStatus),

    /// A rating already exists for this client and reservation
    #[error("You have already rated this reservation")]
    AlreadyRated,
}

impl BookingError {
    /// Stable error code
    ///
    /// - 4xxx: reservation lifecycle
    /// - 5xxx: slot validation
    /// - 6xxx: ratings
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "E4001",
            Self::InvalidStatus(_) => "E4002",
            Self::PastDate { .. } => "E5001",
            Self::PastTime { .. } => "E5002",
            Self::Overlap { .. } => "E5003",
            Self::InvalidSlot => "E5004",
            Self::SlotUnavailable { .. } => "E5005",
            Self::InvalidRating(_) => "E6001",
            Self::RatingNotAllowed(_) => "E6002",
            Self::AlreadyRated => "E6003",
        }
    }

    /// Whether the error came from slot-creation validation
    pub fn is_slot_validation(&self) -> bool {
        matches!(
            self,
            Self::PastDate { .. } | Self::PastTime { .. } | Self::Overlap { .. } | Self::InvalidSlot
        )
    }
}

/// Result type for booking operations
pub type BookingResult<T> = Result<T, BookingError>;
