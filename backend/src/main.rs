//! Backend entry-point: loads settings, wires adapters and serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultEnv, Env};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookshelf::inbound::http::health::HealthState;
use bookshelf::outbound::open_library::OpenLibrarySource;
use bookshelf::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use bookshelf::outbound::security::JwtSecret;
use bookshelf::outbound::security::secret_config::{BuildMode, jwt_secret_from_env};
use bookshelf::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Connect to PostgreSQL, applying migrations first when enabled.
async fn connect_database(settings: &AppSettings, url: &str) -> std::io::Result<DbPool> {
    if settings.run_migrations() {
        run_migrations(url)
            .await
            .map_err(|err| std::io::Error::other(format!("database migrations failed: {err}")))?;
    }
    DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool setup failed: {err}")))
}

/// Read the token signing secret for the current build mode.
fn load_jwt_secret<E: Env>(env: &E) -> std::io::Result<JwtSecret> {
    jwt_secret_from_env(env, BuildMode::from_debug_assertions()).map_err(std::io::Error::other)
}

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

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let jwt_secret = load_jwt_secret(&DefaultEnv::new())?;

    let endpoints = settings.catalog_endpoints().map_err(std::io::Error::other)?;
    let catalog = OpenLibrarySource::new(endpoints, settings.catalog_timeout())
        .map_err(|err| std::io::Error::other(format!("catalog client setup failed: {err}")))?;

    let mut config = ServerConfig::new(bind_addr, jwt_secret, Arc::new(catalog));
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect_database(&settings, url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "bookshelf listening");
    server.await
}
