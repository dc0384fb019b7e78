//! PostgreSQL-backed user read adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageRequest, PageSlice};
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::diesel_helpers::{
    DbFailure, classify, from_sql_count, map_pool_error_message, to_sql_count,
};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify(error, "user read") {
        DbFailure::Connection { message } => UserPersistenceError::connection(message),
        DbFailure::Query { message } => UserPersistenceError::query(message),
        other => UserPersistenceError::query(format!("unexpected failure: {other:?}")),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(&raw))
            .select(UserRow::as_select())
            .order_by(users::username)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn list(&self, page: PageRequest) -> Result<PageSlice<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by((users::username, users::id))
            .offset(to_sql_count(page.offset()))
            .limit(to_sql_count(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(PageSlice::new(
            from_sql_count(total),
            rows.into_iter().map(User::from).collect(),
        ))
    }
}
