//!
//! Configuration management for toolgate.
//!
//! This module provides a layered configuration system using:
//! - Platform-native configuration directories (XDG on Linux, standard paths on macOS/Windows)
//! - TOML format for human-readable configuration files
//! - Multi-layered configuration hierarchy (env vars > explicit file > user config > system config > defaults)
//! - Validation with errors, warnings and suggestions
//!
//! Submodules:
//! - `loader.rs` - Configuration loading logic
//! - `paths.rs` - Platform-native path resolution
//! - `validation.rs` - Configuration validation
//! - `cli.rs` - CLI configuration commands
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- modules --------------------------------------------------------------------------------- */

pub mod cli;
pub mod loader;
pub mod paths;
pub mod validation;

/* --- uses ------------------------------------------------------------------------------------ */

use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

pub use validation::{ValidationIssue, ValidationSeverity};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Main application configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend (forward target) configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Translation behavior configuration
    #[serde(default)]
    pub translation: TranslationConfig,
}

///
/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server port number
    #[serde(default = "default_port")]
    pub port: u16,
    /// Application logging level
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

///
/// Backend configuration.
///
/// The gateway forwards every translated request to exactly one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Full URL of the backend chat completions endpoint
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Timeout for one backend round-trip (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

///
/// Translation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// What to do with content blocks after the first one of a message
    #[serde(default = "default_multi_block")]
    pub multi_block: MultiBlockPolicy,
}

///
/// Handling of messages that carry more than one content block.
///
/// Only the first block of a message is translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiBlockPolicy {
    /// Forward the first block, drop the rest with a warning
    Collapse,
    /// Fail the request instead of dropping blocks
    Reject,
}

///
/// Logging level enumeration.
///
/// Defines available log levels compatible with tracing crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/* --- defaults -------------------------------------------------------------------------------- */

/// Default HTTP port
fn default_port() -> u16 {
    8080
}

/// Default logging level
fn default_log_level() -> LogLevel {
    LogLevel::Info
}

/// Default backend endpoint
fn default_backend_url() -> String {
    "http://localhost:8000/v1/chat/completions".to_string()
}

/// Default backend timeout (5 minutes)
fn default_timeout_secs() -> u64 {
    300
}

/// Default multi-block handling
fn default_multi_block() -> MultiBlockPolicy {
    MultiBlockPolicy::Collapse
}

/* --- implementations --------------------------------------------------------------------- */

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port(), log_level: default_log_level() }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { url: default_backend_url(), timeout_secs: default_timeout_secs() }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self { multi_block: default_multi_block() }
    }
}

impl Config {
    /// Load configuration from the standard hierarchy:
    /// 1. Environment variables (highest priority)
    /// 2. Explicit config file (`TOOLGATE_CONFIG`)
    /// 3. User config file (~/.config/toolgate/config.toml)
    /// 4. System config file (/etc/toolgate/config.toml)
    /// 5. Built-in defaults (lowest priority)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(GatewayError)` - Configuration loading failed
    ///
    /// # Examples
    /// ```rust,no_run
    /// use toolgate::config::Config;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config::load()?;
    /// println!("Server will run on port {}", config.server.port);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        loader::ConfigLoader::new()
            .with_defaults()
            .with_system_config()?
            .with_user_config()?
            .with_explicit_config()?
            .with_env_vars()?
            .build()
    }

    /// Collect all validation issues (errors, warnings and hints)
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validation::ConfigValidator::new(self).issues()
    }

    /// Fail if the configuration has any error-level issue
    pub fn ensure_valid(&self) -> Result<()> {
        validation::ConfigValidator::new(self).validate()
    }

    /// Get configuration file example as TOML string
    ///
    /// Returns a documented example configuration file that users
    /// can use as a starting point for their own configuration.
    pub fn example_toml() -> &'static str {
        r#"# toolgate configuration
# This file should be placed at:
#   Linux/Unix: ~/.config/toolgate/config.toml
#   macOS: ~/Library/Application Support/com.SkyCorp.toolgate/config.toml
#   Windows: %APPDATA%/SkyCorp/toolgate/config/config.toml

[server]
# HTTP server port (default: 8080, PORT env var also honoured)
port = 8080

# Logging level: trace, debug, info, warn, error (default: info)
log_level = "info"

[backend]
# Chat completions endpoint every translated request is forwarded to
url = "http://localhost:8000/v1/chat/completions"

# Timeout for one backend round-trip in seconds (default: 300)
timeout_secs = 300

[translation]
# Messages with several content blocks: only the first block is translated.
# - collapse: forward the first block and drop the rest (logged as a warning)
# - reject: answer 400 instead of dropping content
multi_block = "collapse"
"#
    }
}

impl LogLevel {
    /// Convert to tracing::Level for logging setup
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }

    /// Check if trace-level logging is enabled
    pub fn is_trace_enabled(self) -> bool {
        matches!(self, LogLevel::Trace | LogLevel::Debug)
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(GatewayError::Config(format!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl MultiBlockPolicy {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "collapse" | "first" => Ok(MultiBlockPolicy::Collapse),
            "reject" | "error" => Ok(MultiBlockPolicy::Reject),
            _ => Err(GatewayError::Config(format!(
                "Invalid multi-block policy '{}'. Valid policies are: collapse, reject",
                s
            ))),
        }
    }
}

/* --- tests ------------------------------------------------------------------------------- */
