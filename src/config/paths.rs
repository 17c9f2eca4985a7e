//!
//! Platform-native path resolution for toolgate configuration.
//!
//! - Linux/Unix: XDG Base Directory Specification (~/.config)
//! - macOS: Standard Application Support directories (~/Library/...)
//! - Windows: Known Folder system (%APPDATA%, %PROGRAMDATA%)
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::error::{GatewayError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/* --- constants ------------------------------------------------------------------------------- */

/// Application name for directory resolution
const APP_NAME: &str = "toolgate";
/// Organization qualifier for directory resolution
const ORGANIZATION: &str = "com";
/// Organization name for directory resolution
const ORG_NAME: &str = "SkyCorp";
/// Configuration file name inside every config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/* --- public functions ------------------------------------------------------------------------ */

/// Get the user configuration directory for toolgate
///
/// Returns the platform-appropriate configuration directory:
/// - Linux: ~/.config/toolgate/
/// - macOS: ~/Library/Application Support/com.SkyCorp.toolgate/
/// - Windows: %APPDATA%/SkyCorp/toolgate/config/
///
/// Does not create the directory; the gateway only ever reads from it.
///
/// # Returns
/// * `Some(PathBuf)` - Path to user configuration directory
/// * `None` - No home directory could be resolved
pub fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from(ORGANIZATION, ORG_NAME, APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the default user configuration file path
///
/// # Returns
/// * `Some(PathBuf)` - e.g. ~/.config/toolgate/config.toml
/// * `None` - No home directory could be resolved
pub fn user_config_file() -> Option<PathBuf> {
    user_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Get the system configuration directory for toolgate
///
/// - Linux: /etc/toolgate/
/// - macOS: /Library/Preferences/toolgate/
/// - Windows: %PROGRAMDATA%/toolgate/
///
/// # Returns
/// * `Ok(PathBuf)` - Path to system configuration directory
/// * `Err(GatewayError)` - Unable to determine system config directory
pub fn system_config_dir() -> Result<PathBuf> {
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Ok(PathBuf::from("/etc").join(APP_NAME))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(PathBuf::from("/Library/Preferences").join(APP_NAME))
    }

    #[cfg(windows)]
    {
        std::env::var("PROGRAMDATA").map(|path| PathBuf::from(path).join(APP_NAME)).map_err(|_| {
            GatewayError::Config("PROGRAMDATA environment variable not found".to_string())
        })
    }
}

/// Get the system configuration file path (e.g. /etc/toolgate/config.toml)
pub fn system_config_file() -> Result<PathBuf> {
    Ok(system_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Expand `~` and environment variables in file paths
///
/// # Arguments
/// * `path` - Path string that may contain ~ or environment variables
///
/// # Returns
/// * `Ok(PathBuf)` - Expanded path
/// * `Err(GatewayError)` - Path expansion failed
///
/// # Examples
/// ```rust
/// use toolgate::config::paths::expand_path;
///
/// let expanded = expand_path("/etc/toolgate/config.toml").unwrap();
/// assert_eq!(expanded.to_str(), Some("/etc/toolgate/config.toml"));
/// ```
pub fn expand_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path_str = path.as_ref().to_string_lossy();

    if !path_str.starts_with('~') && !path_str.contains('$') {
        return Ok(path.as_ref().to_path_buf());
    }

    let expanded = shellexpand::full(&path_str).map_err(|e| {
        GatewayError::Config(format!(
            "Failed to expand environment variables in path '{}': {}",
            path_str, e
        ))
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Check if a configuration file exists and is readable
///
/// # Arguments
/// * `path` - Path to configuration file to check
///
/// # Returns
/// * `Ok(())` - File exists and is readable
/// * `Err(GatewayError)` - File doesn't exist, isn't a regular file or isn't readable
pub fn validate_config_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GatewayError::Config(format!(
            "Configuration file '{}' does not exist",
            path.display()
        )));
    }

    if !path.is_file() {
        return Err(GatewayError::Config(format!(
            "Configuration path '{}' exists but is not a regular file",
            path.display()
        )));
    }

    std::fs::File::open(path).map_err(|e| {
        GatewayError::Config(format!(
            "Configuration file '{}' exists but cannot be read: {}\n\
             \n\
             Please check file permissions. You can fix this with: chmod 644 '{}'",
            path.display(),
            e,
            path.display()
        ))
    })?;

    Ok(())
}

/// Get all configuration file paths in precedence order (highest first)
///
/// The file named by `TOOLGATE_CONFIG` is not included; it is reported
/// separately by the CLI.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(user_config) = user_config_file() {
        paths.push(user_config);
    }

    if let Ok(system_config) = system_config_file() {
        paths.push(system_config);
    }

    paths
}

/* --- tests ----------------------------------------------------------------------------------- */
