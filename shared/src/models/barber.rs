//! Barber Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Barber directory entry, one per barber account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barber {
    /// Barber id used by slots and reservations (the username when unset)
    pub id: String,
    pub username: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    /// Relative to the backend base URL
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rating_average: f64,
    #[serde(default)]
    pub rating_count: u64,
}

/// Review totals for one barber
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Rounded to one decimal; 0.0 without reviews
    pub average_rating: f64,
    pub review_count: u64,
}
