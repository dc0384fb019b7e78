//! Shared `bb8` pool of `diesel-async` PostgreSQL connections.
//!
//! Every Diesel repository holds a clone of one [`DbPool`]. Pool failures
//! surface as [`PoolError`] and repositories report them as `Connection`
//! port errors, which the HTTP layer turns into 503 responses.

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Connections kept open when no limit is configured.
const DEFAULT_MAX_SIZE: u32 = 10;

/// Failure to build the pool or to borrow a connection from it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("database connection unavailable: {message}")]
    Checkout { message: String },
    #[error("database pool could not start: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Where the pool connects and how many connections it may hold.
///
/// ```
/// use larder::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://larder@localhost/larder").with_max_size(4);
/// assert_eq!(config.max_size(), 4);
/// assert_eq!(config.database_url(), "postgres://larder@localhost/larder");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Cap the number of open connections. Zero is raised to one.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Handle on the shared connection pool. Clones share the same connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. Connections are opened lazily, so an unreachable
    /// server shows up on first checkout rather than here.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Borrow a connection for one repository call.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, DEFAULT_MAX_SIZE)]
    #[case(Some(3), 3)]
    #[case(Some(0), 1)]
    fn max_size_is_at_least_one(#[case] requested: Option<u32>, #[case] expected: u32) {
        let config = PoolConfig::new("postgres://localhost/larder");
        let config = match requested {
            Some(max) => config.with_max_size(max),
            None => config,
        };
        assert_eq!(config.max_size(), expected);
    }

    #[rstest]
    fn errors_keep_the_underlying_message() {
        assert_eq!(
            PoolError::checkout("connection refused").to_string(),
            "database connection unavailable: connection refused"
        );
        assert_eq!(
            PoolError::build("invalid URL").to_string(),
            "database pool could not start: invalid URL"
        );
    }
}
