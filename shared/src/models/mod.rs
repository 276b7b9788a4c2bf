//! Data models
//!
//! Wire types exchanged with the booking backend (JSON, camelCase keys).
//! All IDs are backend-issued strings; timestamps are UTC instants.

pub mod barber;
pub mod rating;
pub mod reservation;
pub mod slot;
pub mod user;

// Re-exports
pub use barber::*;
pub use rating::*;
pub use reservation::*;
pub use slot::*;
pub use user::*;
