//!
//! Configuration loading system for toolgate.
//!
//! This module implements a multi-layered configuration loading system:
//! 1. Environment variables (highest priority)
//! 2. Explicit config file named by TOOLGATE_CONFIG
//! 3. User config file (~/.config/toolgate/config.toml)
//! 4. System config file (/etc/toolgate/config.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! Follows the Builder pattern - each step returns the loader for chaining.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::config::paths;
use crate::config::{Config, LogLevel, MultiBlockPolicy};
use crate::error::{GatewayError, Result};

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

/* --- constants ------------------------------------------------------------------------------- */

/** Prefix of all toolgate environment variables */
const ENV_PREFIX: &str = "TOOLGATE_";

/** Environment variable naming an explicit configuration file */
pub const CONFIG_PATH_ENV: &str = "TOOLGATE_CONFIG";

/** Plain port variable, kept for container platforms that inject it */
const PORT_ENV: &str = "PORT";

/* --- types ----------------------------------------------------------------------------------- */

///
/// Configuration loader implementing the Builder pattern.
///
/// Provides a fluent interface for building configuration from multiple sources
/// in the correct precedence order. Each method returns self for chaining.
pub struct ConfigLoader {
    /// Current configuration being built
    config: Config,
    /// Environment variable overrides collected
    env_overrides: BTreeMap<String, String>,
    /// Whether defaults have been applied
    defaults_applied: bool,
}

/* --- implementations --------------------------------------------------------------------- */

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// # Examples
    /// ```rust,no_run
    /// use toolgate::config::loader::ConfigLoader;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ConfigLoader::new()
    ///     .with_defaults()
    ///     .with_user_config()?
    ///     .with_env_vars()?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Self {
        Self { config: Config::default(), env_overrides: BTreeMap::new(), defaults_applied: false }
    }

    /// Apply built-in default values
    ///
    /// This should be called first in the configuration loading chain.
    pub fn with_defaults(mut self) -> Self {
        self.config = Config::default();
        self.defaults_applied = true;
        self
    }

    /// Load system-wide configuration file
    ///
    /// If the file doesn't exist, this is not considered an error.
    ///
    /// # Returns
    /// * `Ok(Self)` - System config loaded or skipped (file not found)
    /// * `Err(GatewayError)` - System config exists but failed to load
    pub fn with_system_config(mut self) -> Result<Self> {
        let system_config_path = paths::system_config_file()?;

        if system_config_path.exists() {
            tracing::debug!("Loading system config from: {}", system_config_path.display());
            self.load_config_file(&system_config_path)?;
        } else {
            tracing::debug!("System config not found at: {}", system_config_path.display());
        }

        Ok(self)
    }

    /// Load user configuration file
    ///
    /// If the file doesn't exist (or no home directory can be resolved), this is
    /// not considered an error.
    ///
    /// # Returns
    /// * `Ok(Self)` - User config loaded or skipped
    /// * `Err(GatewayError)` - User config exists but failed to load
    pub fn with_user_config(mut self) -> Result<Self> {
        let Some(user_config_path) = paths::user_config_file() else {
            tracing::debug!("No user config directory available");
            return Ok(self);
        };

        if user_config_path.exists() {
            tracing::debug!("Loading user config from: {}", user_config_path.display());
            self.load_config_file(&user_config_path)?;
        } else {
            tracing::debug!("User config not found at: {}", user_config_path.display());
        }

        Ok(self)
    }

    /// Load the file named by `TOOLGATE_CONFIG`, if set
    ///
    /// Unlike the user and system files, a named file that is missing is an error.
    pub fn with_explicit_config(self) -> Result<Self> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let expanded = paths::expand_path(path.trim())?;
                self.with_config_file(expanded)
            }
            _ => Ok(self),
        }
    }

    /// Load configuration from specific file path
    ///
    /// # Arguments
    /// * `path` - Path to configuration file to load
    ///
    /// # Returns
    /// * `Ok(Self)` - Config loaded successfully
    /// * `Err(GatewayError)` - Failed to load or parse config file
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading custom config from: {}", path.display());
        self.load_config_file(path)?;
        Ok(self)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - TOOLGATE_SERVER_PORT (or PORT)
    /// - TOOLGATE_SERVER_LOG_LEVEL
    /// - TOOLGATE_BACKEND_URL
    /// - TOOLGATE_BACKEND_TIMEOUT_SECS
    /// - TOOLGATE_TRANSLATION_MULTI_BLOCK
    ///
    /// `TOOLGATE_SERVER_PORT` wins over `PORT` when both are set.
    ///
    /// # Returns
    /// * `Ok(Self)` - Environment variables applied
    /// * `Err(GatewayError)` - Invalid environment variable values
    pub fn with_env_vars(mut self) -> Result<Self> {
        tracing::debug!("Loading configuration from environment variables");

        for (key, value) in env::vars() {
            if key.starts_with(ENV_PREFIX) || key == PORT_ENV {
                self.env_overrides.insert(key, value);
            }
        }

        self.apply_env_overrides()?;

        Ok(self)
    }

    /// Build the final configuration
    ///
    /// # Returns
    /// * `Ok(Config)` - Fully-loaded configuration
    /// * `Err(GatewayError)` - `with_defaults()` was never called
    pub fn build(self) -> Result<Config> {
        if !self.defaults_applied {
            return Err(GatewayError::Config(
                "Configuration loader must call with_defaults() before build()".to_string(),
            ));
        }

        tracing::debug!(
            "Final config: server.port={}, server.log_level={:?}, backend.url={}, translation.multi_block={:?}",
            self.config.server.port,
            self.config.server.log_level,
            self.config.backend.url,
            self.config.translation.multi_block
        );

        Ok(self.config)
    }

    /* --- private methods ----------------------------------------------------------------- */

    /// Load a TOML file; its values replace the current ones
    fn load_config_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();

        paths::validate_config_file(path)?;

        let contents = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let table: toml::Table = toml::from_str(&contents).map_err(|e| {
            GatewayError::Config(format!(
                "Failed to parse TOML configuration file '{}': {}\n\
                 \n\
                 Please check the syntax of your configuration file.\n\
                 Run 'toolgate config example' for a valid starting point.",
                path.display(),
                e
            ))
        })?;

        self.merge_table(table, path)?;

        tracing::debug!("Successfully loaded config from: {}", path.display());
        Ok(())
    }

    /// Merge only the keys present in `table` over the current configuration
    ///
    /// The current configuration is serialized back to TOML, overlaid with the
    /// file's keys and decoded again, so a key the file does not mention keeps
    /// the value an earlier layer gave it.
    fn merge_table(&mut self, table: toml::Table, path: &Path) -> Result<()> {
        let current = toml::Value::try_from(&self.config).map_err(|e| {
            GatewayError::Config(format!("Failed to prepare configuration merge: {}", e))
        })?;
        let toml::Value::Table(mut merged) = current else {
            return Err(GatewayError::Config(
                "Failed to prepare configuration merge: not a table".to_string(),
            ));
        };

        for (section, value) in table {
            match (merged.get_mut(&section), value) {
                (Some(toml::Value::Table(current)), toml::Value::Table(overrides)) => {
                    current.extend(overrides);
                }
                (_, value) => {
                    merged.insert(section, value);
                }
            }
        }

        self.config = toml::Value::Table(merged).try_into().map_err(|e| {
            GatewayError::Config(format!(
                "Invalid configuration values in '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Apply environment variable overrides to current configuration
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = self.env_overrides.get(PORT_ENV) {
            if !self.env_overrides.contains_key("TOOLGATE_SERVER_PORT") {
                self.config.server.port = parse_port(value, PORT_ENV)?;
            }
        }

        for (key, value) in &self.env_overrides {
            match key.as_str() {
                "TOOLGATE_SERVER_PORT" => {
                    self.config.server.port = parse_port(value, key)?;
                }
                "TOOLGATE_SERVER_LOG_LEVEL" => {
                    self.config.server.log_level = LogLevel::from_str(value)?;
                }
                "TOOLGATE_BACKEND_URL" => {
                    self.config.backend.url = value.trim().to_string();
                }
                "TOOLGATE_BACKEND_TIMEOUT_SECS" => {
                    self.config.backend.timeout_secs = value.parse().map_err(|e| {
                        GatewayError::Config(format!(
                            "Invalid TOOLGATE_BACKEND_TIMEOUT_SECS value '{}': {}",
                            value, e
                        ))
                    })?;
                }
                "TOOLGATE_TRANSLATION_MULTI_BLOCK" => {
                    self.config.translation.multi_block = MultiBlockPolicy::from_str(value)?;
                }
                PORT_ENV | CONFIG_PATH_ENV => {}
                _ => {
                    tracing::debug!("Ignoring unknown environment variable: {}", key);
                }
            }
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/* --- utility functions ------------------------------------------------------------------- */

/// Parse a port number from an environment variable
fn parse_port(value: &str, var_name: &str) -> Result<u16> {
    value.trim().parse().map_err(|e| {
        GatewayError::Config(format!(
            "Invalid {} value '{}': {}\n\
             Port must be a number between 1 and 65535.",
            var_name, value, e
        ))
    })
}

/* --- tests ------------------------------------------------------------------------------- */
