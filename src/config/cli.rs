//!
//! CLI configuration commands for toolgate.
//!
//! - `config show` - Display the effective configuration
//! - `config path` - List configuration file locations
//! - `config example` - Print a documented example configuration
//! - `validate` - Validate configuration, exit code 0/1
//! - `doctor` - Human-readable configuration health check
//!
//! Every command renders to a `String` first so output can be tested
//! without capturing stdout.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::config::loader::CONFIG_PATH_ENV;
use crate::config::paths;
use crate::config::{Config, ValidationIssue, ValidationSeverity};
use std::fmt::Write;
use std::path::Path;

/* --- types ----------------------------------------------------------------------------------- */

///
/// CLI configuration command handler.
pub struct ConfigCli;

/* --- implementations --------------------------------------------------------------------- */

impl ConfigCli {
    /// Handle `config <subcommand>`
    ///
    /// # Arguments
    /// * `subcommand` - `show`, `path` or `example`
    ///
    /// # Returns
    /// * Process exit code
    pub fn run(subcommand: Option<&str>) -> i32 {
        match subcommand {
            Some("show") => Self::show(),
            Some("path") => {
                print!("{}", Self::render_paths());
                0
            }
            Some("example") => {
                print!("{}", Config::example_toml());
                0
            }
            Some(other) => {
                eprintln!("Error: Unknown config command: {}", other);
                eprintln!();
                eprintln!("Available config commands: show, path, example");
                1
            }
            None => {
                eprintln!("Error: Missing config command");
                eprintln!();
                eprintln!("Available config commands: show, path, example");
                1
            }
        }
    }

    /// Handle the `config show` command
    ///
    /// Displays the effective configuration after merging all sources.
    pub fn show() -> i32 {
        match Config::load() {
            Ok(config) => {
                print!("{}", Self::render_config(&config));
                println!();
                print!("{}", Self::render_paths());
                0
            }
            Err(e) => {
                eprintln!("[ERROR] Configuration error: {}", e);
                1
            }
        }
    }

    /// Handle the `validate` command
    ///
    /// # Returns
    /// * `0` if the configuration loads and has no errors, `1` otherwise
    pub fn validate() -> i32 {
        match Config::load() {
            Ok(config) => {
                let issues = config.validate();
                let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();

                if errors.is_empty() {
                    println!("[OK] Configuration is valid");
                    0
                } else {
                    eprintln!("[ERROR] Configuration validation failed:");
                    for issue in &errors {
                        eprintln!("  • {}: {}", issue.field, issue.message);
                    }
                    1
                }
            }
            Err(e) => {
                eprintln!("[ERROR] Configuration error: {}", e);
                1
            }
        }
    }

    /// Handle the `doctor` command
    ///
    /// Always exits 0; problems are reported, not enforced.
    pub fn doctor() -> i32 {
        println!("toolgate doctor - Configuration Health Check");
        println!("{}", "=".repeat(60));
        println!();

        if Path::new(".env").exists() {
            println!("[OK] Found .env file");
        } else {
            println!("[INFO] No .env file found (using environment variables)");
        }
        println!();

        print!("{}", Self::render_paths());
        println!();

        println!("Configuration Validation:");
        match Config::load() {
            Ok(config) => {
                println!("  [OK] Configuration loaded successfully");
                println!();
                print!("{}", Self::render_config(&config));
                println!();
                print!("{}", Self::render_issues(&config.validate()));
            }
            Err(e) => {
                println!("  [ERROR] Failed to load configuration:");
                for line in e.to_string().lines() {
                    println!("     {}", line);
                }
            }
        }
        0
    }

    /* --- rendering ----------------------------------------------------------------------- */

    /// Render the effective configuration
    pub fn render_config(config: &Config) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Server Configuration:");
        let _ = writeln!(out, "  Port: {}", config.server.port);
        let _ = writeln!(out, "  Log Level: {:?}", config.server.log_level);
        let _ = writeln!(out);
        let _ = writeln!(out, "Backend Configuration:");
        let _ = writeln!(out, "  URL: {}", config.backend.url);
        let _ = writeln!(out, "  Timeout: {}s", config.backend.timeout_secs);
        let _ = writeln!(out);
        let _ = writeln!(out, "Translation Configuration:");
        let _ = writeln!(out, "  Multi-block messages: {:?}", config.translation.multi_block);
        out
    }

    /// Render configuration file locations, highest priority first
    pub fn render_paths() -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Configuration Sources:");

        match std::env::var(CONFIG_PATH_ENV) {
            Ok(explicit) if !explicit.trim().is_empty() => {
                let status = match paths::expand_path(explicit.trim()) {
                    Ok(path) if path.exists() => "[OK] exists",
                    Ok(_) => "[ERROR] not found",
                    Err(_) => "[ERROR] invalid path",
                };
                let _ = writeln!(out, "  {} ({}): {}", explicit.trim(), CONFIG_PATH_ENV, status);
            }
            _ => {}
        }

        let config_paths = paths::config_file_paths();
        for (i, path) in config_paths.iter().enumerate() {
            let label = if i == 0 && config_paths.len() > 1 { "user" } else { "system" };
            let status = if path.exists() { "[OK] exists" } else { "[--] not found" };
            let _ = writeln!(out, "  {} ({}): {}", path.display(), label, status);
        }
        out
    }

    /// Render validation findings grouped by severity
    pub fn render_issues(issues: &[ValidationIssue]) -> String {
        let mut out = String::new();

        if issues.is_empty() {
            let _ = writeln!(out, "  [OK] No validation issues found");
            return out;
        }

        for (severity, tag) in [
            (ValidationSeverity::Error, "ERROR"),
            (ValidationSeverity::Warning, "WARNING"),
            (ValidationSeverity::Hint, "INFO"),
        ] {
            let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
            if group.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  [{}] Found {} {}(s):", tag, group.len(), severity);
            for issue in group {
                let _ = writeln!(out, "     • {}: {}", issue.field, issue.message);
            }
            let _ = writeln!(out);
        }

        if issues.iter().any(ValidationIssue::is_error) {
            let _ = writeln!(out, "[ERROR] Configuration has errors. Fix them before running toolgate.");
        } else {
            let _ = writeln!(out, "[SUCCESS] Configuration is usable. Review the notes above.");
        }
        out
    }
}

/* --- tests ------------------------------------------------------------------------------- */
