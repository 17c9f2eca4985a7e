//!
//! HTTP server implementation for the translation gateway.
//!
//! Accepts content-block chat requests, translates them into the
//! function-calling schema, forwards them to the backend and relays the
//! backend's reply (status, content type, raw body) unmodified.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::{Value, json};

use crate::backend::{Backend, BackendReply};
use crate::config::Config;
use crate::converter::RequestTranslator;
use crate::error::{GatewayError, Result};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Application state shared by all handlers.
pub struct AppState {
    /** application configuration */
    pub config: Config,
    /** request translator */
    pub translator: RequestTranslator,
    /** backend client */
    pub backend: Backend,
    /** metrics for monitoring */
    pub metrics: AppMetrics,
}

///
/// Application metrics for monitoring and observability.
#[derive(Debug, Default)]
pub struct AppMetrics {
    /** total number of translation requests received */
    pub total_requests: AtomicU64,
    /** requests whose backend reply was relayed, whatever its status */
    pub successful_requests: AtomicU64,
    /** requests answered with a gateway error */
    pub failed_requests: AtomicU64,
    /** content blocks dropped by the first-block collapse */
    pub dropped_blocks: AtomicU64,
    /** objects rewritten by the sanitation pass */
    pub sanitized_objects: AtomicU64,
}

/* --- start of code -------------------------------------------------------------------------- */

impl AppState {
    ///
    /// Create new application state.
    ///
    /// # Arguments
    ///  * `config` - application configuration
    ///
    /// # Returns
    ///  * Application state with translator and backend client
    ///  * `GatewayError::Http` if the backend client cannot be built
    pub fn new(config: Config) -> Result<Self> {
        let translator =
            RequestTranslator::new(config.server.log_level, config.translation.multi_block);
        let backend = Backend::new(&config.backend)?;

        Ok(Self { config, translator, backend, metrics: AppMetrics::default() })
    }
}

///
/// Handle the chat completions endpoint.
///
/// The body is taken as raw bytes so that undecodable input is reported with
/// the gateway's own error shape.
///
/// # Arguments
///  * `state` - shared application state
///  * `headers` - request headers (logged only)
///  * `body` - raw request body
///
/// # Returns
///  * Relayed backend response, or a JSON error response
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.metrics.total_requests.fetch_add(1, Ordering::Relaxed);
    log_incoming_request(&state, &headers, &body);

    match process_chat_completion(&state, &body).await {
        Ok(response) => {
            state.metrics.successful_requests.fetch_add(1, Ordering::Relaxed);
            response
        }
        Err(e) => {
            state.metrics.failed_requests.fetch_add(1, Ordering::Relaxed);
            if e.is_client_error() {
                tracing::warn!("Rejected request: {}", e);
            } else {
                tracing::error!("Request failed: {}", e);
            }
            create_error_response(&e)
        }
    }
}

///
/// Translate, forward and relay one request.
async fn process_chat_completion(state: &AppState, body: &[u8]) -> Result<Response> {
    let translation = state.translator.translate(body)?;

    state.metrics.dropped_blocks.fetch_add(translation.dropped_blocks as u64, Ordering::Relaxed);
    state.metrics.sanitized_objects.fetch_add(translation.sanitized as u64, Ordering::Relaxed);

    if state.config.server.log_level.is_trace_enabled() {
        state.translator.debug(&format!(
            "Forwarding to {}: {}",
            state.backend.url(),
            serde_json::to_string_pretty(&translation.payload)
                .unwrap_or_else(|_| "Failed to serialize".to_string())
        ));
    }

    let reply = state.backend.forward(&translation.payload).await?;
    relay_response(reply)
}

///
/// Build the client response from a backend reply.
///
/// Status, `Content-Type` and body are copied verbatim. A status outside the
/// valid range is answered with 502.
///
/// # Arguments
///  * `reply` - raw backend reply
///
/// # Returns
///  * Response carrying the backend's status, content type and body
///  * `GatewayError::Http` if the response cannot be built
pub fn relay_response(reply: BackendReply) -> Result<Response> {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);

    let mut builder = Response::builder().status(status);
    if let Some(content_type) = reply.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    builder
        .body(Body::from(reply.body))
        .map_err(|e| GatewayError::Http(format!("Failed to build relayed response: {}", e)))
}

///
/// Log incoming request details if trace logging is enabled.
fn log_incoming_request(state: &AppState, headers: &HeaderMap, body: &[u8]) {
    if !state.config.server.log_level.is_trace_enabled() {
        return;
    }

    let user_agent =
        headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()).unwrap_or("unknown");
    state.translator.debug(&format!(
        "Incoming request: {} bytes, user-agent: {}",
        body.len(),
        user_agent
    ));
    state.translator.debug(&format!("Request body: {}", String::from_utf8_lossy(body)));
}

///
/// Answer any non-POST method on the chat completions route.
pub async fn method_not_allowed() -> Response {
    let error_response = json!({
      "error": {
        "message": "Method not allowed: use POST",
        "type": "invalid_request_error",
        "code": StatusCode::METHOD_NOT_ALLOWED.as_u16()
      }
    });

    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "POST")], Json(error_response))
        .into_response()
}

///
/// Create standardized error response.
///
/// # Arguments
///  * `error` - error to convert to HTTP response
///
/// # Returns
///  * HTTP error response with JSON error details
pub fn create_error_response(error: &GatewayError) -> Response {
    let (status_code, error_type) = match error {
        GatewayError::InvalidRequestBody(_) | GatewayError::MalformedContent(_) => {
            (StatusCode::BAD_REQUEST, "invalid_request_error")
        }
        GatewayError::BackendUnreachable(_) | GatewayError::BackendError(_) => {
            (StatusCode::BAD_GATEWAY, "upstream_error")
        }
        GatewayError::BackendTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    let error_response = json!({
      "error": {
        "message": error.to_string(),
        "type": error_type,
        "code": status_code.as_u16()
      }
    });

    (status_code, Json(error_response)).into_response()
}

///
/// Handle health check endpoint.
///
/// # Arguments
///  * `state` - shared application state with metrics
///
/// # Returns
///  * JSON response with health status, backend URL and metrics
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let total_requests = state.metrics.total_requests.load(Ordering::Relaxed);
    let successful_requests = state.metrics.successful_requests.load(Ordering::Relaxed);
    let failed_requests = state.metrics.failed_requests.load(Ordering::Relaxed);

    Json(json!({
      "status": "ok",
      "backend": state.backend.url(),
      "timestamp": chrono::Utc::now().to_rfc3339(),
      "metrics": {
        "total_requests": total_requests,
        "successful_requests": successful_requests,
        "failed_requests": failed_requests,
        "dropped_blocks": state.metrics.dropped_blocks.load(Ordering::Relaxed),
        "sanitized_objects": state.metrics.sanitized_objects.load(Ordering::Relaxed),
        "success_rate": if total_requests > 0 {
          (successful_requests as f64 / total_requests as f64 * 100.0).round()
        } else {
          100.0
        }
      }
    }))
}

/* --- tests ------------------------------------------------------------------------------- */
