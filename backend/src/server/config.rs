//! Server settings loaded via OrthoConfig, and the runtime configuration
//! derived from them.
//!
//! Every setting can come from the command line, a config file or a
//! `LARDER_*` environment variable.

use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use pagination::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE, PageLimits};
use serde::Deserialize;
use tracing::warn;

use larder::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
/// `Key::derive_from` needs at least this much key material.
const MIN_SESSION_KEY_LEN: usize = 32;

/// Raw settings as supplied by the operator.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LARDER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Page size used when a request omits `limit`.
    pub page_size: Option<u64>,
    /// Largest `limit` a client may request.
    pub max_page_size: Option<u64>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub session_cookie_secure: bool,
    /// Fall back to a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

/// Settings that cannot be turned into a runnable configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {source}")]
    BindAddr {
        value: String,
        source: AddrParseError,
    },
    #[error("failed to read session key at {path}: {source}")]
    SessionKey {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("session key at {path} must hold at least {MIN_SESSION_KEY_LEN} bytes")]
    ShortSessionKey { path: PathBuf },
}

impl ServerSettings {
    /// Parse the listen address, defaulting to all interfaces on port 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits::new(
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE),
        )
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let config = PoolConfig::new(url);
        Some(match self.pool_max_size {
            Some(max) => config.with_max_size(max),
            None => config,
        })
    }

    /// Load the session signing key.
    ///
    /// An unreadable key file is fatal in release builds unless
    /// `session_allow_ephemeral` is set; debug builds always fall back to a
    /// random key, which logs every session out on restart.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let path = self.session_key_file();
        match std::fs::read(path) {
            Ok(bytes) if bytes.len() >= MIN_SESSION_KEY_LEN => Ok(Key::derive_from(&bytes)),
            Ok(_) => Err(SettingsError::ShortSessionKey {
                path: path.to_owned(),
            }),
            Err(source) if cfg!(debug_assertions) || self.session_allow_ephemeral => {
                warn!(path = %path.display(), error = %source, "using temporary session key");
                Ok(Key::generate())
            }
            Err(source) => Err(SettingsError::SessionKey {
                path: path.to_owned(),
                source,
            }),
        }
    }
}

/// Runtime configuration handed to [`super::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) page_limits: PageLimits,
}

impl ServerConfig {
    /// Resolve the settings that do not need I/O beyond the key file.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            key: settings.session_key()?,
            cookie_secure: settings.session_cookie_secure,
            bind_addr: settings.bind_addr()?,
            page_limits: settings.page_limits(),
        })
    }
}
