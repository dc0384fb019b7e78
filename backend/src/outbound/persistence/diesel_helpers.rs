//! Shared helpers for Diesel repository implementations.
//!
//! Repositories classify Diesel failures once with [`classify`] and then map
//! the resulting [`DbFailure`] onto their own port error enum, so constraint
//! handling reads the same in every adapter.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub(crate) fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Coarse classification of a Diesel error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    /// A unique or primary key constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation {
        constraint: Option<String>,
        message: String,
    },
    /// A CHECK constraint rejected the write.
    CheckViolation { constraint: Option<String> },
    /// `first`/`get_result` found no row.
    NotFound,
    /// The connection dropped mid-operation.
    Connection { message: String },
    /// Anything else.
    Query { message: String },
}

/// Classify `error`, logging the raw failure at debug level.
pub(crate) fn classify(error: DieselError, operation: &str) -> DbFailure {
    match error {
        DieselError::NotFound => DbFailure::NotFound,
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::UniqueViolation => DbFailure::UniqueViolation { constraint },
                DatabaseErrorKind::ForeignKeyViolation => DbFailure::ForeignKeyViolation {
                    constraint,
                    message: info.message().to_owned(),
                },
                DatabaseErrorKind::CheckViolation => DbFailure::CheckViolation { constraint },
                DatabaseErrorKind::ClosedConnection => DbFailure::Connection {
                    message: "database connection error".to_owned(),
                },
                _ => DbFailure::Query {
                    message: format!("{operation}: database error"),
                },
            }
        }
        other => {
            debug!(error = %other, %operation, "diesel operation failed");
            DbFailure::Query {
                message: format!("{operation}: {other}"),
            }
        }
    }
}

/// Convert a page offset or limit to the `BIGINT` Diesel expects.
pub(crate) fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert a `COUNT(*)` result back to `u64`.
pub(crate) fn from_sql_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

/// Foreign key failure carrying a constraint name, as PostgreSQL reports it.
#[cfg(test)]
pub(crate) struct ForeignKeyInfo(pub Option<&'static str>);

#[cfg(test)]
impl diesel::result::DatabaseErrorInformation for ForeignKeyInfo {
    fn message(&self) -> &str {
        "insert or update violates foreign key constraint"
    }

    fn details(&self) -> Option<&str> {
        None
    }

    fn hint(&self) -> Option<&str> {
        None
    }

    fn table_name(&self) -> Option<&str> {
        None
    }

    fn column_name(&self) -> Option<&str> {
        None
    }

    fn constraint_name(&self) -> Option<&str> {
        self.0
    }

    fn statement_position(&self) -> Option<i32> {
        None
    }
}
