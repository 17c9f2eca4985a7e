//! # toolgate - content-block to function-calling translation gateway
//!
//! Listens for chat requests in the content-block schema, translates them
//! into the function-calling schema and forwards them to one backend. The
//! backend's status, content type and body are relayed unmodified.
//!
//! ## Configuration
//!
//! ```bash
//! export PORT=8080                                                   # or TOOLGATE_SERVER_PORT
//! export TOOLGATE_BACKEND_URL=http://localhost:8000/v1/chat/completions
//! export TOOLGATE_BACKEND_TIMEOUT_SECS=300
//! export TOOLGATE_SERVER_LOG_LEVEL=info
//! export TOOLGATE_TRANSLATION_MULTI_BLOCK=collapse                   # or reject
//! ```
//!
//! ## API Usage
//!
//! ```bash
//! curl -X POST http://localhost:8080/v1/chat/completions \
//!   -H "Content-Type: application/json" \
//!   -d '{
//!     "model": "x",
//!     "messages": [{"role": "user", "content": [{"type": "text", "text": "Hello!"}]}]
//!   }'
//! ```
//!
//! Authors: Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp
//!

/* --- uses ------------------------------------------------------------------------------------ */

use std::env;

use anyhow::Context;
use axum::Router;
use tracing::info;
use tracing_subscriber::EnvFilter;

use toolgate::config::cli::ConfigCli;
use toolgate::{CHAT_COMPLETIONS_PATH, Config, GatewayError, HEALTH_PATH, create_app};

/* --- constants ------------------------------------------------------------------------------ */

/** the version as defined in cargo.toml */
const VERSION: &str = env!("CARGO_PKG_VERSION");

/* --- start of code -------------------------------------------------------------------------- */

///
/// Main application entry point for the toolgate translation gateway.
///
/// Handles CLI commands first, then loads configuration, initializes logging
/// and serves the gateway until the process is stopped.
#[tokio::main]
async fn main() {
    // .env values are visible to every command, including doctor and validate
    let _ = dotenvy::dotenv();

    handle_cli_args();

    if let Err(e) = run().await {
        eprintln!("Error:");
        for cause in e.chain() {
            for line in cause.to_string().lines() {
                eprintln!("{}", line);
            }
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    initialize_logging(&config);
    config.ensure_valid()?;

    let app = create_app(config.clone()).context("Failed to create application")?;

    start_server(&config, app).await?;
    Ok(())
}

///
/// Handle command line arguments before config loading.
///
/// Exits the process for every recognized command; returns only when the
/// server should start.
fn handle_cli_args() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        return;
    }

    match args[1].as_str() {
        "--version" | "-V" => {
            println!("toolgate {}", VERSION);
            std::process::exit(0);
        }
        "--help" | "-h" => {
            print_help();
            std::process::exit(0);
        }
        "doctor" => {
            std::process::exit(ConfigCli::doctor());
        }
        "validate" => {
            std::process::exit(ConfigCli::validate());
        }
        "config" => {
            std::process::exit(ConfigCli::run(args.get(2).map(String::as_str)));
        }
        other => {
            if other.starts_with('-') {
                eprintln!("Error: Unknown option: {}", other);
            } else {
                eprintln!("Error: Unknown command: {}", other);
            }
            eprintln!();
            eprintln!("Run 'toolgate --help' for more information.");
            std::process::exit(1);
        }
    }
}

///
/// Print help information for the toolgate CLI.
fn print_help() {
    println!("toolgate v{}", VERSION);
    println!("Gateway translating content-block chat requests into function-calling requests");
    println!();
    println!("USAGE:");
    println!("    toolgate [COMMAND] [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    doctor              Check configuration and system health");
    println!("    validate            Validate configuration and exit");
    println!("    config show         Show the effective configuration");
    println!("    config path         List configuration file locations");
    println!("    config example      Print a documented example configuration");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help          Print help information");
    println!("    -V, --version       Print version information");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    PORT                               Server port (default: 8080)");
    println!("    TOOLGATE_SERVER_PORT               Server port, wins over PORT");
    println!(
        "    TOOLGATE_SERVER_LOG_LEVEL          Log level: trace, debug, info, warn, error (default: info)"
    );
    println!("    TOOLGATE_BACKEND_URL               Backend chat completions endpoint");
    println!("                                       (default: http://localhost:8000/v1/chat/completions)");
    println!("    TOOLGATE_BACKEND_TIMEOUT_SECS      Backend timeout in seconds (default: 300)");
    println!("    TOOLGATE_TRANSLATION_MULTI_BLOCK   collapse or reject (default: collapse)");
    println!("    TOOLGATE_CONFIG                    Explicit configuration file");
    println!("    RUST_LOG                           Overrides the log filter");
    println!();
    println!("EXAMPLES:");
    println!("    toolgate                    Start the gateway");
    println!("    toolgate doctor             Check configuration");
    println!("    toolgate config example > ~/.config/toolgate/config.toml");
}

///
/// Initialize logging with the configured log level.
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
///
/// # Arguments
///  * `config` - application configuration containing log level settings
fn initialize_logging(config: &Config) {
    let default_level = config.server.log_level.to_tracing_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

///
/// Bind the listener and serve until shutdown.
///
/// # Arguments
///  * `config` - application configuration
///  * `app` - configured Axum application
///
/// # Returns
///  * `Ok(())` when server shuts down gracefully
///  * `GatewayError::Http` if binding or serving fails
async fn start_server(config: &Config, app: Router) -> Result<(), GatewayError> {
    let port = config.server.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await.map_err(|e| {
        let error_msg = format!("Failed to bind to port {}: {}", port, e);

        if e.kind() == std::io::ErrorKind::AddrInUse {
            GatewayError::Http(format!(
                "{}\n\n\
                 Port {} is already in use. Either stop the other process\n\
                 (lsof -i :{}) or choose another port:\n\
                 \x20  export PORT=8081\n\n\
                 Run 'toolgate doctor' for more help.",
                error_msg, port, port
            ))
        } else {
            GatewayError::Http(format!(
                "{}\n\n\
                 Ensure the port is valid (1-65535) and that you may bind to it.\n\
                 Run 'toolgate doctor' for more help.",
                error_msg
            ))
        }
    })?;

    log_startup_info(config);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GatewayError::Http(format!("Server error: {}", e)))?;

    info!("toolgate stopped");
    Ok(())
}

///
/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

///
/// Log startup information.
fn log_startup_info(config: &Config) {
    info!("toolgate v{} running on port {}", VERSION, config.server.port);
    info!("Translation endpoint: http://localhost:{}{}", config.server.port, CHAT_COMPLETIONS_PATH);
    info!("Health endpoint: http://localhost:{}{}", config.server.port, HEALTH_PATH);
    info!(
        "Forwarding to {} (timeout {}s, multi-block: {:?})",
        config.backend.url, config.backend.timeout_secs, config.translation.multi_block
    );

    if config.server.log_level.is_trace_enabled() {
        info!(
            "[TRACE] Trace logging is ENABLED (TOOLGATE_SERVER_LOG_LEVEL={:?}) - request and \
             forwarded payloads will be logged",
            config.server.log_level
        );
    }
}
