// src/main.rs

//! # DID Wizard - Main Entry Point
//!
//! Loads configuration, builds the document builder and starts the API server.
//!
//! ## Environment Variables
//! - `RUST_LOG`: (Optional) log filter (default: info)
//! - `DID__SERVER__HOST`, `DID__SERVER__PORT`: (Optional) bind address (default: 127.0.0.1:3000)
//! - `DID__DOCUMENT__DEFAULT_SERVICE_ENDPOINT`: (Optional) fallback service endpoint
//! - `DID__DOCUMENT__PROOF`: (Optional) `omit` or `placeholder` (default: omit)

use anyhow::Context;
use did_wizard::config::Settings;
use did_wizard::services::api_server::ApiServer;
use did_wizard::utils::clock::{SharedClock, SystemClock};
use dotenv::dotenv;
use std::sync::Arc;

/// Main application entry point
///
/// # Initialization Sequence
/// 1. Load environment configuration and logging
/// 2. Build the document builder from settings
/// 3. Start API server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load().context("failed to load configuration")?;
    let addr = settings
        .socket_addr()
        .context("invalid server host or port")?;

    let clock: SharedClock = Arc::new(SystemClock);
    let builder = settings
        .document
        .builder(clock)
        .context("invalid document settings")?;

    log::info!(
        "Issuing did:{} documents (proof: {:?})",
        settings.document.method,
        settings.document.proof
    );
    log::info!("Available endpoints:");
    log::info!("- GET  /health");
    log::info!("- POST /connect-wallet");
    log::info!("- POST /create-did");
    log::info!("- POST /view-did");

    ApiServer::new(builder)
        .run(addr)
        .await
        .context("API server failed")
}
