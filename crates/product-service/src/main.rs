//! # Product Service
//!
//! Serves the products collection over HTTP.
//!
//! 1. Set up tracing and read the configuration ([`Cli`]).
//! 2. Start the [`ProductSystem`] over the products document.
//! 3. Serve HTTP until Ctrl-C, then drain in-flight requests.
//! 4. Shut the system down, letting queued mutations finish.

use clap::Parser;
use collection_actor::tracing::setup_tracing;
use product_service::config::Cli;
use product_service::http::HttpServer;
use product_service::lifecycle::ProductSystem;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Cli::parse().into_config()?;
    info!(?config, "Starting product service");

    let system = ProductSystem::start(&config).await?;
    let server = HttpServer::new(&config, system.product_client.clone());

    server.serve(shutdown_signal()).await?;

    system.shutdown().await?;
    info!("Product service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl-C");
}
