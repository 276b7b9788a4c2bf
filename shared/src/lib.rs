//! Shared types for the BarberCut booking platform
//!
//! Domain models, the reservation lifecycle, slot availability and
//! notification diffing. Everything here is pure: no I/O, no clocks.
//! Callers pass `now` in explicitly.

pub mod booking;
pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use booking::{Actor, StatusDiff, StatusSnapshot};
pub use error::{BookingError, BookingResult};
pub use models::{Rating, Reservation, ReservationStatus, Slot, UserRole};
