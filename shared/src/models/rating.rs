//! Rating Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client rating of a completed reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: String,
    pub barber_id: String,
    pub client_id: String,
    pub reservation_id: String,
    /// 1.0 - 5.0 (the backend stores a double)
    pub rating: f64,
    #[serde(default)]
    pub feedback: Option<String>,
    /// Barber's reply
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Display names resolved by list endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barber_name: Option<String>,
}

/// Create rating payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    pub barber_id: String,
    pub client_id: String,
    pub reservation_id: String,
    pub rating: u8,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Barber reply payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingReply {
    pub reply: String,
}

/// Average rating of a barber, rounded to one decimal by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAverage {
    pub barber_id: String,
    pub average: f64,
    pub count: u64,
}
