//! Driving port for listing followed authors.

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{Error, Subscription, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsQuery: Send + Sync {
    /// One page of authors `follower` subscribes to, each with a recipe
    /// preview truncated to `recipes_limit`.
    async fn list_subscriptions(
        &self,
        follower: &UserId,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<PageSlice<Subscription>, Error>;
}
