//! Barber Client - REST client for the BarberCut booking backend
//!
//! Typed endpoint calls with local validation of status transitions, slot
//! overlaps and rating eligibility, an explicit signed-in [`Session`], and
//! cancellable polling tasks that feed the notification watchers.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod session;
pub mod tasks;
pub mod watch;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{BookingDetails, Session};
pub use tasks::{MIN_POLL_INTERVAL, PollHandle, PollTask, RequestSequencer};
pub use watch::{PendingWatcher, ReservationWatcher, WatchUpdate};

// Re-export shared types for convenience
pub use shared::booking::{Actor, SlotCandidate, StatusSnapshot};
pub use shared::client::{LoginRequest, RegisterRequest};
pub use shared::models::{
    AuthProfile, Barber, NewReservation, Rating, RatingAverage, RatingSummary, Reservation,
    ReservationStatus, Slot, UserProfile, UserRole,
};
pub use shared::BookingError;
