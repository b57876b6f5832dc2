//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BOOKSHELF_*` environment variables and
//! configuration files, in the usual OrthoConfig precedence. Every field is
//! optional; accessors apply the defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::open_library::OpenLibraryEndpoints;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CATALOG_BASE_URL: &str = "https://openlibrary.org";
const DEFAULT_COVERS_BASE_URL: &str = "https://covers.openlibrary.org";
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address did not parse as `host:port`.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A catalog base URL did not parse.
    #[error("invalid {name} {value:?}: {source}")]
    Url {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Settings for the bookshelf server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSHELF")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Apply pending migrations before serving; on unless set to `false`.
    pub run_migrations: Option<bool>,
    /// Open Library API root.
    pub catalog_base_url: Option<String>,
    /// Open Library cover image root.
    pub covers_base_url: Option<String>,
    /// Per-request timeout for catalog calls, in seconds.
    pub catalog_timeout_secs: Option<u64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Address to bind, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Database URL, treating a blank value as absent.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Whether to apply pending migrations at startup, defaulting to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Catalog and cover roots.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Url`] when either URL is malformed.
    pub fn catalog_endpoints(&self) -> Result<OpenLibraryEndpoints, SettingsError> {
        Ok(OpenLibraryEndpoints {
            catalog: parse_url(
                "catalog_base_url",
                self.catalog_base_url.as_deref().unwrap_or(DEFAULT_CATALOG_BASE_URL),
            )?,
            covers: parse_url(
                "covers_base_url",
                self.covers_base_url.as_deref().unwrap_or(DEFAULT_COVERS_BASE_URL),
            )?,
        })
    }

    /// Catalog request timeout.
    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(
            self.catalog_timeout_secs
                .unwrap_or(DEFAULT_CATALOG_TIMEOUT_SECS),
        )
    }

    /// Pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        name,
        value: value.to_owned(),
        source,
    })
}
