//! PostgreSQL-backed subscription adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageRequest, PageSlice};
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};

use super::diesel_helpers::{
    DbFailure, classify, from_sql_count, map_pool_error_message, to_sql_count,
};
use super::models::NewSubscriptionRow;
use super::pool::{DbPool, PoolError};
use super::schema::subscriptions;

/// Diesel-backed implementation of the subscription port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SubscriptionRepositoryError {
    SubscriptionRepositoryError::connection(map_pool_error_message(error))
}

/// Foreign key from `subscriptions.follower_id` to `users`.
const FOLLOWER_FOREIGN_KEY: &str = "subscriptions_follower_fk";

fn map_diesel_error(error: diesel::result::Error) -> SubscriptionRepositoryError {
    match classify(error, "subscription") {
        DbFailure::UniqueViolation { .. } => SubscriptionRepositoryError::already_subscribed(),
        DbFailure::CheckViolation { .. } => SubscriptionRepositoryError::self_subscription(),
        DbFailure::ForeignKeyViolation { constraint, .. }
            if constraint.as_deref() == Some(FOLLOWER_FOREIGN_KEY) =>
        {
            SubscriptionRepositoryError::missing_follower()
        }
        DbFailure::ForeignKeyViolation { .. } => SubscriptionRepositoryError::missing_author(),
        DbFailure::Connection { message } => SubscriptionRepositoryError::connection(message),
        DbFailure::Query { message } => SubscriptionRepositoryError::query(message),
        DbFailure::NotFound => SubscriptionRepositoryError::query("unexpected empty result"),
    }
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn insert(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSubscriptionRow {
            follower_id: *follower.as_uuid(),
            author_id: *author.as_uuid(),
        };
        diesel::insert_into(subscriptions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            subscriptions::table.find((*follower.as_uuid(), *author.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, SubscriptionRepositoryError> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<Uuid> = authors.iter().map(|id| *id.as_uuid()).collect();
        let found: Vec<Uuid> = subscriptions::table
            .filter(subscriptions::follower_id.eq(*follower.as_uuid()))
            .filter(subscriptions::author_id.eq_any(&raw))
            .select(subscriptions::author_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(found.into_iter().map(UserId::from_uuid).collect())
    }

    async fn list_authors(
        &self,
        follower: &UserId,
        page: PageRequest,
    ) -> Result<PageSlice<UserId>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let follower_id = *follower.as_uuid();
        let total: i64 = subscriptions::table
            .filter(subscriptions::follower_id.eq(follower_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let authors: Vec<Uuid> = subscriptions::table
            .filter(subscriptions::follower_id.eq(follower_id))
            .order_by((subscriptions::created_at, subscriptions::author_id))
            .select(subscriptions::author_id)
            .offset(to_sql_count(page.offset()))
            .limit(to_sql_count(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(PageSlice::new(
            from_sql_count(total),
            authors.into_iter().map(UserId::from_uuid).collect(),
        ))
    }
}
