//! Slot availability
//!
//! Slots are half-open intervals `[start, end)`. Day boundaries and "today"
//! follow the time zone of the `now` argument, so a caller passing
//! `Local::now()` gets the barber's wall-clock view.

use crate::error::{BookingError, BookingResult};
use crate::models::{DEFAULT_SLOT_DURATION_MINUTES, Reservation, Slot, SlotRequest};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use std::collections::HashSet;

/// Proposed slot, validated before it is sent to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCandidate {
    pub barber_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SlotCandidate {
    pub fn new(barber_id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            barber_id: barber_id.into(),
            start,
            end,
        }
    }

    /// Candidate of `duration_minutes`; non-positive values use the 60 minute default
    ///
    /// Fails with [`BookingError::InvalidSlot`] when the end is not representable.
    pub fn with_duration(
        barber_id: impl Into<String>,
        start: DateTime<Utc>,
        duration_minutes: i64,
    ) -> BookingResult<Self> {
        let minutes = if duration_minutes > 0 {
            duration_minutes
        } else {
            DEFAULT_SLOT_DURATION_MINUTES
        };
        let end = TimeDelta::try_minutes(minutes)
            .and_then(|length| start.checked_add_signed(length))
            .ok_or(BookingError::InvalidSlot)?;
        Ok(Self::new(barber_id, start, end))
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn to_request(&self) -> SlotRequest {
        SlotRequest {
            barber_id: self.barber_id.clone(),
            start_iso: self.start,
            duration_minutes: self.duration_minutes(),
        }
    }
}

/// Last instant of a day, returned once no whole minute is left in it
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Round up to the next whole minute
fn ceil_to_minute(time: NaiveTime) -> NaiveTime {
    let Some(floor) = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0) else {
        return time;
    };
    if floor == time {
        return time;
    }
    match floor.overflowing_add_signed(TimeDelta::minutes(1)) {
        (next, 0) => next,
        _ => END_OF_DAY,
    }
}

/// Earliest start a barber can pick on `proposed`
///
/// The later of the latest slot end on that day and, when `proposed` is
/// today, the current time, rounded up to a whole minute so the result
/// passes [`validate_candidate`]. Midnight when neither applies.
pub fn next_available_start<Tz: TimeZone>(
    day_slots: &[Slot],
    proposed: NaiveDate,
    now: &DateTime<Tz>,
) -> NaiveTime {
    let tz = now.timezone();
    let latest_end = day_slots
        .iter()
        .map(|slot| slot.end.with_timezone(&tz))
        .filter(|end| end.date_naive() == proposed)
        .map(|end| ceil_to_minute(end.time()))
        .max();

    let mut earliest = latest_end.unwrap_or(NaiveTime::MIN);
    if proposed == now.date_naive() {
        earliest = earliest.max(ceil_to_minute(now.time()));
    }
    earliest
}

/// Whether `[start, end)` intersects any of `existing`
pub fn would_overlap(existing: &[Slot], start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    existing.iter().any(|slot| slot.overlaps(start, end))
}

/// Check a candidate against the clock and the barber's existing slots
///
/// Slots belonging to other barbers are ignored.
pub fn validate_candidate<Tz: TimeZone>(
    existing: &[Slot],
    candidate: &SlotCandidate,
    now: &DateTime<Tz>,
) -> BookingResult<()> {
    if candidate.end <= candidate.start {
        return Err(BookingError::InvalidSlot);
    }

    let date = candidate.start.with_timezone(&now.timezone()).date_naive();
    if date < now.date_naive() {
        return Err(BookingError::PastDate { date });
    }

    if candidate.start < now.with_timezone(&Utc) {
        return Err(BookingError::PastTime {
            start: candidate.start,
        });
    }

    let clash = existing
        .iter()
        .filter(|slot| slot.barber_id == candidate.barber_id)
        .find(|slot| slot.overlaps(candidate.start, candidate.end));
    if let Some(slot) = clash {
        return Err(BookingError::Overlap {
            start: candidate.start,
            end: candidate.end,
            existing_id: slot.id.clone(),
        });
    }

    Ok(())
}

/// Slots a client can still book, ordered by start
///
/// Drops slots that already started and slots whose start is held by a
/// PENDING or APPROVED reservation of the same barber.
pub fn bookable_slots(slots: &[Slot], reservations: &[Reservation], now: DateTime<Utc>) -> Vec<Slot> {
    let taken: HashSet<(&str, DateTime<Utc>)> = reservations
        .iter()
        .filter(|r| r.status.holds_slot())
        .map(|r| (r.barber_id.as_str(), r.slot))
        .collect();

    let mut open: Vec<Slot> = slots
        .iter()
        .filter(|slot| slot.start > now)
        .filter(|slot| !taken.contains(&(slot.barber_id.as_str(), slot.start)))
        .cloned()
        .collect();
    open.sort_by_key(|slot| slot.start);
    open
}
