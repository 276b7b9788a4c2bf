//! Reservation Model

use crate::error::BookingError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback service length when the backend reports none
pub const DEFAULT_SERVICE_DURATION_MINUTES: u32 = 40;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Waiting for the barber's decision
    Pending,
    Approved,
    /// Slot window has started
    InProgress,
    Declined,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 6] = [
        Self::Pending,
        Self::Approved,
        Self::InProgress,
        Self::Declined,
        Self::Cancelled,
        Self::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::InProgress => "IN_PROGRESS",
            Self::Declined => "DECLINED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Declined | Self::Cancelled | Self::Completed)
    }

    /// Statuses that keep the slot occupied
    pub fn holds_slot(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BookingError::InvalidStatus(s.to_string()))
    }
}

/// Reservation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub barber_id: String,
    pub client_id: String,
    /// Client display name (filled by the backend on list endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_username: Option<String>,
    /// Slot start
    pub slot: DateTime<Utc>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub service_duration_minutes: u32,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Service length, falling back to [`DEFAULT_SERVICE_DURATION_MINUTES`]
    pub fn service_duration(&self) -> Duration {
        let minutes = match self.service_duration_minutes {
            0 => DEFAULT_SERVICE_DURATION_MINUTES,
            m => m,
        };
        Duration::minutes(i64::from(minutes))
    }

    /// End of the service window
    pub fn slot_end(&self) -> DateTime<Utc> {
        self.slot + self.service_duration()
    }
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub barber_id: String,
    pub client_id: String,
    pub slot: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    pub service_name: String,
    pub service_duration_minutes: u32,
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ReservationStatus,
}
