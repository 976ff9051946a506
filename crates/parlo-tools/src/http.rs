//! HTTP backend abstraction for the tool backend.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with automatic retry logic for transient errors.

use crate::config::ToolsConfig;
use crate::error::{ToolsError, ToolsResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can exchange JSON with the tool backend.
///
/// This abstraction allows for dependency injection of HTTP clients,
/// making it easy to test code that depends on HTTP requests.
///
/// This is an implementation detail — external code should use `ToolsClient`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ToolsResult<T>;

    /// POST a JSON body and deserialize the JSON response.
    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> ToolsResult<T>;

    /// POST a single file as a multipart form and deserialize the JSON
    /// response. `field` is the form field name the backend expects
    /// (`"audio"`, `"image"`, ...).
    async fn post_multipart<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ToolsResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors. Client errors (4xx) fail immediately, carrying the
/// backend's `error` string when the body has one.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ToolsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        }
    }

    /// Send a request with automatic retry for transient errors.
    ///
    /// Takes a builder closure rather than a prepared request because
    /// multipart bodies cannot be cloned between attempts.
    async fn send_with_retry<F>(&self, url: &Url, build: F) -> ToolsResult<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut last_error: Option<ToolsError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1);
                tracing::debug!(attempt, url = %url, "retrying tool backend request");
                tokio::time::sleep(delay).await;
            }

            match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(ToolsError::RequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    // 4xx errors or final attempt: surface the backend's
                    // error string if the body carries one.
                    return Err(error_from_response(response, url).await);
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or(ToolsError::RequestFailed {
            status: 0,
            url: url.to_string(),
        }))
    }
}

/// Build a `ToolsError` from a non-success response, preferring the
/// backend's `{"error": "..."}` body over a bare status code.
async fn error_from_response(response: reqwest::Response, url: &Url) -> ToolsError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned));

    match message {
        Some(message) => ToolsError::Backend { status, message },
        None => ToolsError::RequestFailed {
            status,
            url: url.to_string(),
        },
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ToolsResult<T> {
        let response = self
            .send_with_retry(url, || self.client.get(url.as_str()))
            .await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> ToolsResult<T> {
        let response = self
            .send_with_retry(url, || self.client.post(url.as_str()).json(body))
            .await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn post_multipart<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ToolsResult<T> {
        let field = field.to_owned();
        let file_name = file_name.to_owned();
        let response = self
            .send_with_retry(url, || {
                let part = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone());
                let form = reqwest::multipart::Form::new().part(field.clone(), part);
                self.client.post(url.as_str()).multipart(form)
            })
            .await?;
        let data: T = response.json().await?;
        Ok(data)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
