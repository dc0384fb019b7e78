//! Driving port for following and unfollowing authors.

use async_trait::async_trait;

use crate::domain::{Error, Subscription, UserId};

/// Domain use-case port for subscription writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsCommand: Send + Sync {
    /// Follow `author`. Following yourself or following twice fails with
    /// `conflict`; an unknown author with `not_found`.
    async fn subscribe(
        &self,
        follower: &UserId,
        author: &UserId,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, Error>;

    /// Stop following `author`. Fails with `not_found` when not following.
    async fn unsubscribe(&self, follower: &UserId, author: &UserId) -> Result<(), Error>;
}
