//! Slot Model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default slot length when the barber gives none
pub const DEFAULT_SLOT_DURATION_MINUTES: i64 = 60;

/// Barber-defined bookable interval `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    pub barber_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open intersection test against `[start, end)`
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

/// Create slot payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub barber_id: String,
    #[serde(rename = "startISO")]
    pub start_iso: DateTime<Utc>,
    pub duration_minutes: i64,
}
