//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use papersign::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origin: String,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration with in-memory persistence.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        cors_origin: impl Into<String>,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            cors_origin: cors_origin.into(),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
