use ee_auth::{CredentialVerifier, JwksKeySource, ServiceCredentials};
use ee_config::Config;
use ee_server::{AppState, build_router, logger};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path: Option<PathBuf> = if let Some(ref filename) = config.logging.file {
        let log_dir = config.log_dir()?;
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting ee-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Database (created on first run, migrations applied)
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = ee_db::connect(&database_path).await?;
    info!("Database ready");

    let verifier = build_verifier(&config)?;

    let state = AppState::new(pool, verifier, &config.auth);
    info!(
        "Session tokens valid for {}s",
        state.session_issuer.ttl().as_secs()
    );
    state.ensure_development_user().await?;

    let app = build_router(state.clone());

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

/// Provider verification is only possible with a credentials file; without
/// one every provider token is answered with "provider unavailable"
fn build_verifier(config: &Config) -> Result<CredentialVerifier, Box<dyn Error>> {
    let path = config.provider_credentials_path()?;

    match ServiceCredentials::load(&path)? {
        Some(credentials) => {
            let keys = JwksKeySource::new(
                config.auth.jwks_url.clone(),
                Duration::from_secs(config.auth.jwks_cache_ttl_secs),
            )?;
            info!(
                "Identity provider configured for project '{}' (service account: {}), keys from {}",
                credentials.project_id,
                credentials.client_email.as_deref().unwrap_or("unspecified"),
                keys.url()
            );
            Ok(CredentialVerifier::new(&credentials, Arc::new(keys)))
        }
        None => {
            warn!(
                "Provider credentials not found at {}; provider tokens will be rejected as unavailable",
                path.display()
            );
            Ok(CredentialVerifier::unavailable())
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
