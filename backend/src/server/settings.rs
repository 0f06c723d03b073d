//! Server settings loaded via OrthoConfig.
//!
//! Values come from `PAPERSIGN_*` environment variables, an optional config
//! file and the command line. Unset options fall back to the defaults below.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use papersign::outbound::persistence::DEFAULT_POOL_SIZE;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const SESSION_KEY_MIN_LEN: usize = 64;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing keys and warn instead of failing.
    Debug,
    /// Release builds require a real session key.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PAPERSIGN")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it the server keeps documents
    /// and accounts in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_size: Option<u32>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure` (defaults to on). Environment or file
    /// only: a CLI switch would always report `false` when absent.
    #[ortho_config(skip_cli)]
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for the session cookie.
    pub same_site: Option<String>,
    /// Permit a generated session key when the key file is unreadable.
    /// Environment or file only.
    #[ortho_config(skip_cli)]
    pub allow_ephemeral_key: Option<bool>,
    /// Origin allowed to call `/api` with credentials.
    pub cors_origin: Option<String>,
}

/// Errors raised while resolving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A value is present but malformed.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` without a secure cookie.
    #[error("same_site=None requires cookie_secure")]
    InsecureSameSiteNone,
    /// Release builds must not run with a generated key.
    #[error("allow_ephemeral_key must be disabled in release builds")]
    EphemeralNotAllowed,
}

/// Resolved session cookie settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl ServerSettings {
    /// Listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::Invalid {
            name: "bind_addr",
            value: raw.to_owned(),
            expected: "host:port",
        })
    }

    /// Database URL, if persistence is configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Pool size, defaulting to [`DEFAULT_POOL_SIZE`].
    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Path of the session key file.
    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie is marked `Secure`, defaulting to `true`.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Whether a generated session key may stand in for the key file.
    pub fn allow_ephemeral_key(&self) -> bool {
        self.allow_ephemeral_key.unwrap_or(false)
    }

    /// Allowed CORS origin.
    pub fn cors_origin(&self) -> &str {
        self.cors_origin.as_deref().unwrap_or(DEFAULT_CORS_ORIGIN)
    }

    /// `SameSite` policy, defaulting to `Lax`.
    pub fn same_site(&self) -> Result<SameSite, SettingsError> {
        let Some(value) = self.same_site.as_deref() else {
            return Ok(SameSite::Lax);
        };
        let same_site = match value.to_ascii_lowercase().as_str() {
            "lax" => SameSite::Lax,
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            _ => {
                return Err(SettingsError::Invalid {
                    name: "same_site",
                    value: value.to_owned(),
                    expected: SAMESITE_EXPECTED,
                });
            }
        };
        if same_site == SameSite::None && !self.cookie_secure() {
            return Err(SettingsError::InsecureSameSiteNone);
        }
        Ok(same_site)
    }

    /// Resolve the session key and cookie attributes.
    pub fn session_settings(&self, mode: BuildMode) -> Result<SessionSettings, SettingsError> {
        let allow_ephemeral = self.allow_ephemeral_key();
        if allow_ephemeral && !mode.is_debug() {
            return Err(SettingsError::EphemeralNotAllowed);
        }
        let cookie_secure = self.cookie_secure();
        let same_site = self.same_site()?;
        let key = self.session_key(mode.is_debug() || allow_ephemeral)?;
        Ok(SessionSettings {
            key,
            cookie_secure,
            same_site,
        })
    }

    fn session_key(&self, tolerate: bool) -> Result<Key, SettingsError> {
        let path = self.session_key_file();
        match std::fs::read(path) {
            Ok(mut bytes) => {
                let length = bytes.len();
                if length < SESSION_KEY_MIN_LEN {
                    bytes.zeroize();
                    if tolerate {
                        warn!(path = %path.display(), length, "session key too short; using temporary key");
                        return Ok(Key::generate());
                    }
                    return Err(SettingsError::KeyTooShort {
                        path: path.to_path_buf(),
                        length,
                        min_len: SESSION_KEY_MIN_LEN,
                    });
                }
                let key = Key::derive_from(&bytes);
                bytes.zeroize();
                Ok(key)
            }
            Err(error) if tolerate => {
                warn!(path = %path.display(), %error, "using temporary session key (dev only)");
                Ok(Key::generate())
            }
            Err(source) => Err(SettingsError::KeyRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
