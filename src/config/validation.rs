//!
//! Configuration validation for toolgate.
//!
//! Checks network settings, the backend endpoint and translation settings.
//! Every finding is kept as a [`ValidationIssue`] so the CLI can print all of
//! them at once, while [`ConfigValidator::validate`] only fails on errors.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::config::{Config, LogLevel, MultiBlockPolicy};
use crate::error::{GatewayError, Result};
use reqwest::Url;
use std::fmt;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Severity of a single validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    /// Informational suggestion
    Hint,
    /// Valid, but likely not what the operator wants
    Warning,
    /// Configuration cannot be used
    Error,
}

///
/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /** how serious the finding is */
    pub severity: ValidationSeverity,
    /** dotted configuration key, e.g. `backend.url` */
    pub field: &'static str,
    /** human readable description */
    pub message: String,
}

///
/// Configuration validator.
///
/// Validates:
/// - Network settings (port)
/// - Backend endpoint (URL shape, timeout)
/// - Translation settings
pub struct ConfigValidator<'a> {
    /// Configuration to validate
    config: &'a Config,
    /// Findings collected during validation
    issues: Vec<ValidationIssue>,
}

/* --- implementations --------------------------------------------------------------------- */

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationSeverity::Hint => write!(f, "hint"),
            ValidationSeverity::Warning => write!(f, "warning"),
            ValidationSeverity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.field, self.message)
    }
}

impl ValidationIssue {
    /// True for findings that make the configuration unusable
    pub fn is_error(&self) -> bool {
        self.severity == ValidationSeverity::Error
    }
}

impl<'a> ConfigValidator<'a> {
    /// Create a new configuration validator
    ///
    /// # Arguments
    /// * `config` - Configuration to validate
    pub fn new(config: &'a Config) -> Self {
        Self { config, issues: Vec::new() }
    }

    /// Run every check and return all findings, most severe first
    pub fn issues(mut self) -> Vec<ValidationIssue> {
        self.run_checks();
        self.issues.sort_by(|a, b| b.severity.cmp(&a.severity));
        self.issues
    }

    /// Run every check and fail if any error was found
    ///
    /// Warnings are logged and do not fail validation.
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is usable
    /// * `Err(GatewayError::Config)` - Listing every error found
    pub fn validate(self) -> Result<()> {
        let issues = self.issues();

        for issue in issues.iter().filter(|i| i.severity == ValidationSeverity::Warning) {
            tracing::warn!("Configuration warning: {}: {}", issue.field, issue.message);
        }

        let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
        if !errors.is_empty() {
            let error_msg = format!(
                "Configuration validation failed with {} error(s):\n\n{}\n\
                 \n\
                 Please fix these issues and try again.\n\
                 Run 'toolgate config example' for a documented configuration file.",
                errors.len(),
                errors
                    .iter()
                    .enumerate()
                    .map(|(i, e)| format!("{}. {}: {}", i + 1, e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
            return Err(GatewayError::Config(error_msg));
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /* --- private validation methods ------------------------------------------------------ */

    fn run_checks(&mut self) {
        self.validate_server_config();
        self.validate_backend_config();
        self.validate_translation_config();
    }

    /// Validate server configuration
    fn validate_server_config(&mut self) {
        let server = &self.config.server;

        if server.port == 0 {
            self.add(
                ValidationSeverity::Error,
                "server.port",
                "Invalid server port 0: must be between 1 and 65535".to_string(),
            );
        } else if server.port < 1024 {
            self.add(
                ValidationSeverity::Warning,
                "server.port",
                format!("Server port {} requires root/administrator privileges", server.port),
            );
        }

        if server.log_level == LogLevel::Trace {
            self.add(
                ValidationSeverity::Warning,
                "server.log_level",
                "Trace log level enabled: request payloads may be logged".to_string(),
            );
        }
    }

    /// Validate backend endpoint configuration
    fn validate_backend_config(&mut self) {
        let backend = &self.config.backend;

        match Url::parse(&backend.url) {
            Err(e) => self.add(
                ValidationSeverity::Error,
                "backend.url",
                format!("Invalid backend URL '{}': {}", backend.url, e),
            ),
            Ok(url) => {
                if !matches!(url.scheme(), "http" | "https") {
                    self.add(
                        ValidationSeverity::Error,
                        "backend.url",
                        format!(
                            "Unsupported backend URL scheme '{}': use http or https",
                            url.scheme()
                        ),
                    );
                } else if url.host_str().is_none_or(str::is_empty) {
                    self.add(
                        ValidationSeverity::Error,
                        "backend.url",
                        format!("Backend URL '{}' has no host", backend.url),
                    );
                }

                if url.path() == "/" {
                    self.add(
                        ValidationSeverity::Hint,
                        "backend.url",
                        "Backend URL has no path; requests are posted to it verbatim, \
                         did you mean .../v1/chat/completions?"
                            .to_string(),
                    );
                }
            }
        }

        if backend.timeout_secs == 0 {
            self.add(
                ValidationSeverity::Error,
                "backend.timeout_secs",
                "Backend timeout cannot be zero".to_string(),
            );
        } else if backend.timeout_secs < 5 {
            self.add(
                ValidationSeverity::Warning,
                "backend.timeout_secs",
                format!(
                    "Very short backend timeout ({}s) may abort slow completions",
                    backend.timeout_secs
                ),
            );
        }
    }

    /// Validate translation configuration
    fn validate_translation_config(&mut self) {
        if self.config.translation.multi_block == MultiBlockPolicy::Collapse {
            self.add(
                ValidationSeverity::Hint,
                "translation.multi_block",
                "Content blocks after the first one of a message are dropped; \
                 set multi_block = \"reject\" to refuse such requests instead"
                    .to_string(),
            );
        }
    }

    /// Record a finding
    fn add(&mut self, severity: ValidationSeverity, field: &'static str, message: String) {
        tracing::debug!("Validation {}: {}: {}", severity, field, message);
        self.issues.push(ValidationIssue { severity, field, message });
    }
}

/* --- tests ------------------------------------------------------------------------------- */
