//! User profiles rendered with the viewer's subscription state.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::ports::{SubscriptionRepository, UserRepository, UsersQuery};
use crate::domain::recipe_query_service::author_profiles;
use crate::domain::{AuthorProfile, Error, UserId};

/// Implements [`UsersQuery`].
#[derive(Clone)]
pub struct UserDirectoryService<U, S> {
    users: Arc<U>,
    subscriptions: Arc<S>,
}

impl<U, S> UserDirectoryService<U, S> {
    pub fn new(users: Arc<U>, subscriptions: Arc<S>) -> Self {
        Self {
            users,
            subscriptions,
        }
    }
}

#[async_trait]
impl<U, S> UsersQuery for UserDirectoryService<U, S>
where
    U: UserRepository,
    S: SubscriptionRepository,
{
    async fn list_users(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<PageSlice<AuthorProfile>, Error> {
        let slice = self.users.list(page).await?;
        let profiles =
            author_profiles(self.subscriptions.as_ref(), viewer.as_ref(), slice.items).await?;
        Ok(PageSlice::new(slice.total, profiles))
    }

    async fn get_user(&self, viewer: Option<UserId>, id: &UserId) -> Result<AuthorProfile, Error> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
        let mut profiles =
            author_profiles(self.subscriptions.as_ref(), viewer.as_ref(), vec![user]).await?;
        profiles
            .pop()
            .ok_or_else(|| Error::internal(format!("user {id} was not rendered")))
    }
}
