//! HTTP backend abstraction for the photocull server API.
//!
//! The production backend uses reqwest. Only the image listing is retried:
//! uploads and judgment writes are not idempotent from the server's point
//! of view, so they fail fast and let the caller decide.

use std::time::Duration;

use async_trait::async_trait;
use photocull_core::UploadFile;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::{HttpError, HttpResult};

/// Multipart field name the upload endpoint reads files from.
const UPLOAD_FIELD: &str = "files";

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that speak JSON to the photocull server.
///
/// This is an implementation detail - external code should use the
/// `PersistencePort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T>;

    /// Post a JSON body and deserialize the JSON reply.
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> HttpResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    /// Post a JSON body; any 2xx status is success and the reply is not read.
    async fn post_json_ack<B: Serialize + Sync>(&self, url: &Url, body: &B) -> HttpResult<()>;

    /// Post files as a multipart form and deserialize the JSON reply.
    async fn post_multipart<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        files: Vec<UploadFile>,
    ) -> HttpResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// `GET` requests retry server errors (5xx) and network errors with
/// exponential backoff.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &HttpClientConfig) -> HttpResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &Url) -> HttpResult<reqwest::Response> {
        let mut last_error: Option<HttpError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base_delay, attempt);
                tracing::debug!(%url, attempt, ?delay, "Retrying request");
                tokio::time::sleep(delay).await;
            }

            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(HttpError::Status {
                            status: status.as_u16(),
                            url: url.to_string(),
                            message: None,
                        });
                        continue;
                    }

                    return Err(status_error(url, response).await);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HttpError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

/// Delay before retry number `attempt` (1-based).
fn backoff_delay(base: Duration, attempt: u8) -> Duration {
    let factor = 2u32
        .checked_pow(u32::from(attempt.max(1)) - 1)
        .unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

/// Build a status error, keeping the body's `error` field as the message.
async fn status_error(url: &Url, response: reqwest::Response) -> HttpError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| error_message(&body));
    tracing::warn!(%url, status, message = message.as_deref(), "Request failed");
    HttpError::Status {
        status,
        url: url.to_string(),
        message,
    }
}

/// The `error` field of a JSON error body such as `{"error": "No files provided"}`.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(ToString::to_string)
}

async fn read_json<T: DeserializeOwned>(url: &Url, response: reqwest::Response) -> HttpResult<T> {
    if !response.status().is_success() {
        return Err(status_error(url, response).await);
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T> {
        let response = self.fetch_with_retry(url).await?;
        read_json(url, response).await
    }

    async fn post_json<B, T>(&self, url: &Url, body: &B) -> HttpResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let response = self.client.post(url.as_str()).json(body).send().await?;
        read_json(url, response).await
    }

    async fn post_json_ack<B: Serialize + Sync>(&self, url: &Url, body: &B) -> HttpResult<()> {
        let response = self.client.post(url.as_str()).json(body).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(status_error(url, response).await)
        }
    }

    async fn post_multipart<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        files: Vec<UploadFile>,
    ) -> HttpResult<T> {
        let mut form = Form::new();
        for file in files {
            let mut part = Part::bytes(file.bytes).file_name(file.filename);
            if let Some(content_type) = file.content_type {
                part = part.mime_str(&content_type)?;
            }
            form = form.part(UPLOAD_FIELD, part);
        }

        let response = self.client.post(url.as_str()).multipart(form).send().await?;
        read_json(url, response).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
