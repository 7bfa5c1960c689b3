//! E-Sign Gateway Service
//!
//! A gateway service that lets a user fill a web form and, in response,
//! either renders a confirmation page, redirects into an externally hosted
//! signing widget, or creates a signature agreement against a remote e-sign
//! REST API and opens an embedded signing session for it.
//!
//! ## Overview
//!
//! The gateway:
//! 1. Serves the landing forms and confirmation pages
//! 2. Resolves the e-sign account's API access point once and caches it
//! 3. Creates agreements from submitted forms (direct send or embedded)
//! 4. Fetches embedded signing URLs once the remote API has processed the
//!    agreement

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod esign;
mod webform;

use config::Config;
use esign::{AgreementWorkflow, SignClient};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

/// Main application entry point that initializes and runs the gateway.
///
/// This function:
/// 1. Initializes logging and tracing
/// 2. Loads configuration from TOML file
/// 3. Builds the e-sign client and workflow
/// 4. Starts the API server and runs until shutdown
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging for debugging and monitoring
    tracing_subscriber::fmt::init();

    info!("Starting E-Sign Gateway");

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Check for help flag
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("E-Sign Gateway");
        println!();
        println!("Usage: esign-gateway [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --config <path>   Use custom config file path");
        println!("  --help, -h        Show this help message");
        println!();
        println!("Environment variables:");
        println!("  ESIGN_GATEWAY_CONFIG_PATH    Path to config file (overrides --config)");
        return Ok(());
    }

    // Check for custom config path
    let mut config_path = None;
    for (i, arg) in args.iter().enumerate() {
        if arg == "--config" && i + 1 < args.len() {
            config_path = Some(args[i + 1].clone());
            break;
        }
    }

    if let Some(path) = config_path {
        std::env::set_var("ESIGN_GATEWAY_CONFIG_PATH", &path);
        info!("Using custom config: {}", path);
    }

    // Load configuration from config file (or ESIGN_GATEWAY_CONFIG_PATH env var)
    let config = Config::load()?;
    info!("Configuration loaded successfully");

    // Build the e-sign client (credentials are fixed here for the process
    // lifetime; the API base is resolved lazily on first use)
    let client = Arc::new(SignClient::new(&config.esign)?);
    let workflow = AgreementWorkflow::new(client, &config.esign);

    // Run the HTTP server (this blocks until shutdown)
    let api_server = api::ApiServer::new(config, workflow);
    api_server.run().await?;

    Ok(())
}
