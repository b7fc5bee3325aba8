//! # Jagriti Case Search API Main Driver
//!
//! ## Purpose
//! Entry point for the case search adapter. Loads configuration, builds the
//! portal client, and starts the web server for handling search requests.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration file, command line arguments, environment variables
//! - **Output**: Running web server with search API endpoints
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Build the portal client and application state
//! 4. Start the web API server
//! 5. Handle shutdown signals gracefully

use clap::{Arg, Command};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use jagriti_case_search::{
    api::ApiServer,
    config::Config,
    errors::{ApiError, Result},
    AppState, PortalClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("jagriti-api-server")
        .version("1.0.0")
        .author("Lexi Backend Team")
        .about("REST adapter for searching District Consumer Court cases via the Jagriti portal")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Server port")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("check-health")
                .long("check-health")
                .help("Check portal reachability and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = Config::from_file(config_path)?;

    // Override port if specified
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }

    let config = Arc::new(config);

    // Initialize logging
    init_logging(&config)?;

    info!("Starting Jagriti case search API v1.0.0");
    info!("Configuration loaded from: {}", config_path);
    info!("Environment: {:?}", config.environment);

    // Initialize application components
    let app_state = initialize_components(config.clone())?;

    // Run health checks if requested
    if matches.get_flag("check-health") {
        return run_health_checks(&app_state).await;
    }

    // Start the API server
    let server = ApiServer::new(app_state);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("Server error: {}", e);
        }
    });

    info!(
        "Jagriti case search API started on {}:{}",
        config.server.host, config.server.port
    );

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = server_handle => {
            warn!("Server stopped unexpectedly");
        }
    }

    info!("Jagriti case search API shut down");
    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let mut log_level: tracing::Level =
        config.logging.level.parse().map_err(|_| ApiError::Config {
            message: format!("Invalid log level: {}", config.logging.level),
        })?;

    // The debug flag never lowers an explicitly more verbose level
    if config.debug && log_level < tracing::Level::DEBUG {
        log_level = tracing::Level::DEBUG;
    }

    let filter = tracing_subscriber::filter::LevelFilter::from_level(log_level);

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .json()
                    .with_filter(filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_filter(filter),
            )
            .init();
    }

    info!("Logging initialized with level: {}", log_level);
    Ok(())
}

/// Initialize all application components
fn initialize_components(config: Arc<Config>) -> Result<AppState> {
    info!("Initializing portal client...");
    let portal = Arc::new(PortalClient::new(config.portal.clone())?);

    Ok(AppState { config, portal })
}

/// Verify the portal is reachable, then exit
async fn run_health_checks(app_state: &AppState) -> Result<()> {
    info!("Checking portal reachability...");
    app_state.portal.health_check().await?;
    info!("Portal is reachable");
    Ok(())
}
