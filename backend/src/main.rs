//! Backend entry-point: loads settings, prepares persistence and serves the API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use papersign::inbound::http::health::HealthState;
use papersign::outbound::persistence::{DbPool, PoolConfig, migrate};
use server::settings::{BuildMode, ServerSettings};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings = ServerSettings::load_from_iter(args)
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = settings
        .session_settings(BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        settings.cors_origin(),
    );

    if let Some(database_url) = settings.database_url() {
        let applied = migrate(database_url.to_owned())
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations complete");
        let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_size()))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
