//! SocialVerse server binary.
//!
//! Startup sequence:
//!
//! 1. Initialize logging (`SV_LOG` filter, default `info`)
//! 2. Load gateway configuration from the environment
//! 3. Load login credentials (`SV_AUTH_EMAIL`, `SV_AUTH_SALT`,
//!    `SV_AUTH_PASSWORD_DIGEST`; the server refuses to start without them)
//! 4. Open the SQLite store (`SV_DB_PATH`, default `socialverse.db`)
//! 5. Serve HTTP until ctrl-c

use anyhow::{Context, Result};
use sv_gateway::{serve, AppState, Credentials, GatewayConfig};
use sv_store::SocialStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("SV_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let config = GatewayConfig::from_env().context("loading gateway configuration")?;
    let credentials = Credentials::from_env().context("loading login credentials")?;

    let db_path =
        std::env::var("SV_DB_PATH").unwrap_or_else(|_| "socialverse.db".to_string());
    let store = SocialStore::open(&db_path)
        .await
        .with_context(|| format!("opening database at {db_path}"))?;
    info!(db_path, addr = %config.http_addr(), "SocialVerse server starting");

    let state = AppState::new(store, credentials, config);
    serve(state).await.context("running HTTP server")?;

    Ok(())
}
