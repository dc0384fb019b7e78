//! Following authors and listing followed authors with recipe previews.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};
use tracing::debug;

use crate::domain::ports::{
    RecipeRepository, SubscriptionRepository, SubscriptionsCommand, SubscriptionsQuery,
    UserRepository,
};
use crate::domain::{AuthorProfile, Error, Subscription, User, UserId};

/// Subscription service implementing [`SubscriptionsCommand`] and
/// [`SubscriptionsQuery`].
#[derive(Clone)]
pub struct SubscriptionService<U, S, R> {
    users: Arc<U>,
    subscriptions: Arc<S>,
    recipes: Arc<R>,
}

impl<U, S, R> SubscriptionService<U, S, R> {
    pub fn new(users: Arc<U>, subscriptions: Arc<S>, recipes: Arc<R>) -> Self {
        Self {
            users,
            subscriptions,
            recipes,
        }
    }
}

impl<U, S, R> SubscriptionService<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    async fn followed_view(
        &self,
        author: User,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, Error> {
        let preview = self
            .recipes
            .summaries_by_author(&author.id, recipes_limit)
            .await?;
        Ok(Subscription {
            author: AuthorProfile {
                user: author,
                is_subscribed: true,
            },
            recipes_count: preview.total,
            recipes: preview.items,
        })
    }
}

#[async_trait]
impl<U, S, R> SubscriptionsCommand for SubscriptionService<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    async fn subscribe(
        &self,
        follower: &UserId,
        author: &UserId,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, Error> {
        if follower == author {
            return Err(Error::conflict("users cannot subscribe to themselves"));
        }
        let user = self
            .users
            .find_by_id(author)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {author} not found")))?;
        self.subscriptions.insert(follower, author).await?;
        debug!(follower = %follower, author = %author, "subscribed");
        self.followed_view(user, recipes_limit).await
    }

    async fn unsubscribe(&self, follower: &UserId, author: &UserId) -> Result<(), Error> {
        if !self.subscriptions.delete(follower, author).await? {
            return Err(Error::not_found(format!(
                "not subscribed to user {author}"
            )));
        }
        debug!(follower = %follower, author = %author, "unsubscribed");
        Ok(())
    }
}

#[async_trait]
impl<U, S, R> SubscriptionsQuery for SubscriptionService<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    async fn list_subscriptions(
        &self,
        follower: &UserId,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<PageSlice<Subscription>, Error> {
        let slice = self.subscriptions.list_authors(follower, page).await?;
        let mut users: HashMap<UserId, User> = if slice.items.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_many(&slice.items)
                .await?
                .into_iter()
                .map(|user| (user.id.clone(), user))
                .collect()
        };

        let mut views = Vec::with_capacity(slice.items.len());
        for author in &slice.items {
            let user = users
                .remove(author)
                .ok_or_else(|| Error::internal(format!("followed user {author} is missing")))?;
            views.push(self.followed_view(user, recipes_limit).await?);
        }
        Ok(PageSlice::new(slice.total, views))
    }
}
