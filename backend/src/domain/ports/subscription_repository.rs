//! Port abstraction for author subscriptions.

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{Error, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by subscription adapters.
    pub enum SubscriptionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "subscription connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "subscription query failed: {message}",
        /// The follower already follows the author.
        AlreadySubscribed => "already subscribed to this author",
        /// Follower and author are the same user.
        SelfSubscription => "users cannot subscribe to themselves",
        /// The author does not exist.
        MissingAuthor => "author not found",
        /// The follower has no account.
        MissingFollower => "user account not found",
    }
}

/// Port for follower/author links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn insert(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<(), SubscriptionRepositoryError>;

    /// Returns `false` when no subscription existed.
    async fn delete(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, SubscriptionRepositoryError>;

    /// Which of `authors` the follower is subscribed to.
    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, SubscriptionRepositoryError>;

    /// One page of followed authors, in subscription order.
    async fn list_authors(
        &self,
        follower: &UserId,
        page: PageRequest,
    ) -> Result<PageSlice<UserId>, SubscriptionRepositoryError>;
}

impl From<SubscriptionRepositoryError> for Error {
    fn from(err: SubscriptionRepositoryError) -> Self {
        match err {
            SubscriptionRepositoryError::Connection { message } => Error::service_unavailable(
                format!("subscription repository unavailable: {message}"),
            ),
            SubscriptionRepositoryError::Query { message } => {
                Error::internal(format!("subscription repository error: {message}"))
            }
            err @ (SubscriptionRepositoryError::AlreadySubscribed
            | SubscriptionRepositoryError::SelfSubscription) => Error::conflict(err.to_string()),
            err @ SubscriptionRepositoryError::MissingAuthor => Error::not_found(err.to_string()),
            err @ SubscriptionRepositoryError::MissingFollower => {
                Error::unauthorized(err.to_string())
            }
        }
    }
}
