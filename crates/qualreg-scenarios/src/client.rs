// crates/qualreg-scenarios/src/client.rs
// ============================================================================
// Module: API Client
// Description: Thin JSON client over reqwest with request-sample capture.
// Purpose: Issue suite requests and record per-request latency samples.
// Dependencies: reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! The client owns the base URL and default JSON headers, and appends a
//! [`RequestSample`] for every completed request so the runner can compute
//! latency percentiles afterwards. Connection handling, timeouts, and
//! retries stay inside reqwest; the suite treats the client as provided
//! infrastructure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use reqwest::Client;
use reqwest::Method;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised when a request cannot be prepared or completed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Build(String),
    /// A path could not be joined onto the base URL.
    #[error("invalid request path {path}: {reason}")]
    Path {
        /// The offending path.
        path: String,
        /// Join failure description.
        reason: String,
    },
    /// The request failed at the transport level.
    #[error("request failed: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Samples
// ============================================================================

/// Timing record for one completed request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestSample {
    /// HTTP method name.
    pub method: String,
    /// Request path relative to the base URL.
    pub path: String,
    /// Response status code.
    pub status: u16,
    /// Wall-clock request duration in milliseconds.
    pub duration_ms: u64,
}

/// Shared sink collecting samples across a virtual user's requests.
type SampleSink = Arc<Mutex<Vec<RequestSample>>>;

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Decoded response handed to assertion helpers.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Response status code.
    pub status: u16,
    /// Parsed JSON body; `None` when the body is empty or not JSON.
    pub body: Option<Value>,
    /// Raw body length in bytes, before parsing.
    pub body_len: usize,
    /// Wall-clock request duration.
    pub duration: Duration,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// JSON client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL of the service under test.
    base_url: Url,
    /// Underlying reqwest client (provided infrastructure).
    client: Client,
    /// Completed-request samples for latency aggregation.
    samples: SampleSink,
}

impl ApiClient {
    /// Creates a client with the given base URL and per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the underlying client cannot be
    /// constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            base_url,
            client,
            samples: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Returns a copy of all captured request samples.
    #[must_use]
    pub fn samples(&self) -> Vec<RequestSample> {
        self.samples.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Issues a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on path or transport failure.
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, path, None).await
    }

    /// Issues a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on path or transport failure.
    pub async fn post<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        let payload =
            serde_json::to_value(body).map_err(|err| ClientError::Transport(err.to_string()))?;
        self.send(Method::POST, path, Some(payload)).await
    }

    /// Issues a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on path or transport failure.
    pub async fn put<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        let payload =
            serde_json::to_value(body).map_err(|err| ClientError::Transport(err.to_string()))?;
        self.send(Method::PUT, path, Some(payload)).await
    }

    /// Issues a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on path or transport failure.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(Method::DELETE, path, None).await
    }

    /// Sends a request and records its sample.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.base_url.join(path).map_err(|err| ClientError::Path {
            path: path.to_string(),
            reason: err.to_string(),
        })?;
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");
        if let Some(payload) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(&payload);
        }
        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let bytes =
            response.bytes().await.map_err(|err| ClientError::Transport(err.to_string()))?;
        let duration = started.elapsed();
        self.record(RequestSample {
            method: method.to_string(),
            path: path.to_string(),
            status,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        });
        Ok(ApiResponse {
            status,
            body: if bytes.is_empty() {
                None
            } else {
                serde_json::from_slice(&bytes).ok()
            },
            body_len: bytes.len(),
            duration,
        })
    }

    /// Appends a sample to the shared sink.
    fn record(&self, sample: RequestSample) {
        if let Ok(mut entries) = self.samples.lock() {
            entries.push(sample);
        }
    }
}
