//! HTTP transport for the booking backend
//!
//! Paths are given as segments (`&["api", "slots", id]`) and are
//! percent-encoded onto the base URL. Non-2xx responses carry the
//! response body text as the error message.

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> ClientResult<T>;
    /// GET where 204 (or an empty body) means "nothing there"
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
    ) -> ClientResult<Option<T>>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> ClientResult<T>;
    /// DELETE, ignoring any response body
    async fn delete(&self, path: &[&str]) -> ClientResult<()>;
    /// DELETE returning a plain-text body
    async fn delete_text(&self, path: &[&str]) -> ClientResult<String>;
    fn token(&self) -> Option<&str>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &[&str], query: &[(&str, &str)]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(path);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        path: &[&str],
        query: &[(&str, &str)],
    ) -> ClientResult<RequestBuilder> {
        let url = self.url(path, query)?;
        tracing::debug!(%method, %url, "Sending request");
        let mut req = self.client.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    /// Send and turn non-2xx responses into errors
    async fn send(req: RequestBuilder) -> ClientResult<Response> {
        let response = req.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            status.canonical_reason().unwrap_or("Request failed").to_string()
        } else {
            text
        };
        tracing::debug!(status = status.as_u16(), %message, "Request rejected");

        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        Self::parse(&bytes)
    }

    fn parse<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
        serde_json::from_slice(bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> ClientResult<T> {
        let req = self.request(Method::GET, path, &[])?;
        Self::decode(Self::send(req).await?).await
    }

    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
    ) -> ClientResult<Option<T>> {
        let req = self.request(Method::GET, path, query)?;
        let response = Self::send(req).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Self::parse(&bytes).map(Some)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path, &[])?.json(body);
        Self::decode(Self::send(req).await?).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::PUT, path, &[])?.json(body);
        Self::decode(Self::send(req).await?).await
    }

    async fn delete(&self, path: &[&str]) -> ClientResult<()> {
        let req = self.request(Method::DELETE, path, &[])?;
        Self::send(req).await?;
        Ok(())
    }

    async fn delete_text(&self, path: &[&str]) -> ClientResult<String> {
        let req = self.request(Method::DELETE, path, &[])?;
        Ok(Self::send(req).await?.text().await?)
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
