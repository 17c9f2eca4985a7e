//! # toolgate - content-block to function-calling translation gateway
//!
//! Accepts chat requests written in the content-block schema (typed text,
//! tool-use and tool-result blocks, `input_schema` tools), rewrites them into
//! the function-calling schema (flat content items, `function` tools, string
//! tool choice) and forwards them to a single backend. The backend's reply is
//! relayed unmodified.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use toolgate::{Config, create_app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let app = create_app(config)?;
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Layered configuration (defaults, TOML files, environment)
//! - [`converter`] - Request translation and type sanitation
//! - [`backend`] - Backend HTTP client
//! - [`server`] - Route handlers
//! - [`error`] - Error types and handling

pub mod backend;
pub mod config;
pub mod converter;
pub mod error;
pub mod server;

// Re-export commonly used types
pub use config::{Config, ValidationIssue, ValidationSeverity};
pub use converter::{RequestTranslator, Translation};
pub use error::GatewayError;

/** Path of the translation endpoint */
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/** Path of the health endpoint */
pub const HEALTH_PATH: &str = "/health";

/// Creates the gateway application for the given configuration.
///
/// # Arguments
///
/// * `config` - Application configuration
///
/// # Returns
///
/// Returns an Axum Router that can be served directly.
///
/// # Errors
///
/// Returns a `GatewayError::Http` if the backend client cannot be built.
pub fn create_app(config: Config) -> Result<axum::Router, GatewayError> {
    use axum::Router;
    use axum::routing::{get, post};
    use std::sync::Arc;
    use tower::ServiceBuilder;
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    let app_state = Arc::new(server::AppState::new(config)?);

    Ok(Router::new()
        .route(
            CHAT_COMPLETIONS_PATH,
            post(server::chat_completions).fallback(server::method_not_allowed),
        )
        .route(HEALTH_PATH, get(server::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state))
}
