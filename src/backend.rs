//!
//! Backend client for the translation gateway.
//!
//! Posts the translated payload to the configured chat completions endpoint
//! and hands back the raw reply (status, content type, body) for relaying.
//! Nothing in the reply is parsed or rewritten.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::config::BackendConfig;
use crate::error::{GatewayError, Result};

/* --- constants ------------------------------------------------------------------------------ */

/** Content type of every forwarded request */
const CONTENT_TYPE_JSON: &str = "application/json";

/* --- types ----------------------------------------------------------------------------------- */

///
/// Raw backend reply, relayed unmodified.
#[derive(Debug, Clone)]
pub struct BackendReply {
    /** HTTP status code returned by the backend */
    pub status: u16,
    /** `Content-Type` header, if the backend sent one */
    pub content_type: Option<String>,
    /** response body bytes */
    pub body: Bytes,
}

///
/// HTTP client bound to one backend endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Backend {
    /** pooled HTTP client with the configured timeout */
    client: Client,
    /** full endpoint URL */
    url: String,
}

/* --- start of code -------------------------------------------------------------------------- */

impl Backend {
    ///
    /// Create a backend client.
    ///
    /// # Arguments
    ///  * `config` - backend URL and timeout
    ///
    /// # Returns
    ///  * Configured backend client
    ///  * `GatewayError::Http` if the HTTP client cannot be built
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, url: config.url.clone() })
    }

    /// Endpoint every request is forwarded to.
    pub fn url(&self) -> &str {
        &self.url
    }

    ///
    /// Forward a translated payload and collect the reply.
    ///
    /// Non-success statuses are not errors here; they are relayed as-is.
    ///
    /// # Arguments
    ///  * `payload` - sanitized outbound payload
    ///
    /// # Returns
    ///  * Backend reply
    ///  * `GatewayError::BackendUnreachable` if no connection could be made
    ///  * `GatewayError::BackendTimeout` if the round-trip exceeded the timeout
    ///  * `GatewayError::BackendError` for any other transport failure
    pub async fn forward(&self, payload: &Value) -> Result<BackendReply> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .json(payload)
            .send()
            .await
            .map_err(GatewayError::from_backend)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(GatewayError::from_backend)?;

        if status >= 400 {
            tracing::warn!("Backend answered {} ({} bytes)", status, body.len());
        } else {
            tracing::debug!("Backend answered {} ({} bytes)", status, body.len());
        }

        Ok(BackendReply { status, content_type, body })
    }
}

/* --- tests ------------------------------------------------------------------------------- */
