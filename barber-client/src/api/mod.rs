//! Typed endpoint groups for the booking backend.
//!
//! `ApiClient` is a thin layer over [`HttpClient`]: every call maps to one
//! REST endpoint, and operations with a local rule (status transitions,
//! slot overlap, rating eligibility) check it before sending anything.

mod auth;
mod ratings;
mod reservations;
mod slots;
mod users;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};

/// Booking backend client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: NetworkHttpClient,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpClient::new(config)?,
        })
    }

    /// Underlying transport
    pub fn http(&self) -> &NetworkHttpClient {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn token(&self) -> Option<&str> {
        self.http.token()
    }

    pub(crate) fn set_token(&mut self, token: Option<String>) {
        self.http.set_token(token);
    }
}
