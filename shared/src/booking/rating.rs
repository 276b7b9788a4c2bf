//! Rating eligibility

use crate::error::{BookingError, BookingResult};
use crate::models::{NewRating, Rating, Reservation, ReservationStatus};

/// Check that a client may rate `reservation` with `value`
///
/// `existing` is the client's current rating for the reservation, if any.
pub fn check_rating(
    reservation: &Reservation,
    value: u8,
    existing: Option<&Rating>,
) -> BookingResult<()> {
    if !(1..=5).contains(&value) {
        return Err(BookingError::InvalidRating(value));
    }
    if reservation.status != ReservationStatus::Completed {
        return Err(BookingError::RatingNotAllowed(reservation.status));
    }
    if existing.is_some_and(|r| {
        r.reservation_id == reservation.id && r.client_id == reservation.client_id
    }) {
        return Err(BookingError::AlreadyRated);
    }
    Ok(())
}

/// Build the create payload after [`check_rating`] passes
pub fn prepare_rating(
    reservation: &Reservation,
    value: u8,
    feedback: Option<String>,
    existing: Option<&Rating>,
) -> BookingResult<NewRating> {
    check_rating(reservation, value, existing)?;
    Ok(NewRating {
        barber_id: reservation.barber_id.clone(),
        client_id: reservation.client_id.clone(),
        reservation_id: reservation.id.clone(),
        rating: value,
        feedback: feedback.filter(|f| !f.trim().is_empty()),
    })
}
