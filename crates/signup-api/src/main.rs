//! Signup service - Entry point.

use document_store::{ConnectOptions, DocumentClient};
use signup_api::{
    adapters::Argon2Hasher,
    api::{create_router, AppState},
    config::Config,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting signup service");

    // Open the database once; the handle is shared by every repository
    let options = ConnectOptions {
        encryption_secret: config.database.encryption_secret.clone(),
    };
    let client = match DocumentClient::connect(&config.database.uri, options).await {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to connect to {}: {}", config.database.uri, e);
            std::process::exit(1);
        }
    };

    info!(uri = %client.uri(), "Document store ready");

    let hasher = match Argon2Hasher::from_config(&config.hasher) {
        Ok(h) => h,
        Err(e) => {
            error!("Invalid password hasher configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::from_client(client.clone(), Arc::new(hasher));
    let app = create_router(state);

    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(e) = client.disconnect().await {
        error!("Failed to flush document store on shutdown: {}", e);
    }

    if let Err(e) = served {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Signup service stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
