//! Booking rules
//!
//! - [`status`]: reservation lifecycle and who may drive it
//! - [`availability`]: next free start time, overlap checks, slot validation
//! - [`notify`]: status snapshots and change counting for badges
//! - [`rating`]: when a client may rate a reservation

pub mod availability;
pub mod notify;
pub mod rating;
pub mod status;

pub use availability::{
    SlotCandidate, bookable_slots, next_available_start, validate_candidate, would_overlap,
};
pub use notify::{StatusDiff, StatusSnapshot, diff};
pub use rating::{check_rating, prepare_rating};
pub use status::{Actor, advance_by_clock, allowed_transitions, can_transition, transition};
