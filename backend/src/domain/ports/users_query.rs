//! Driving port for user-facing profile queries.
//!
//! Inbound adapters use this port to render users with the viewer's
//! subscription state without importing persistence concerns.

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{AuthorProfile, Error, UserId};

/// Domain use-case port for listing and fetching users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    async fn list_users(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<PageSlice<AuthorProfile>, Error>;

    /// Fails with `not_found` for an unknown id.
    async fn get_user(&self, viewer: Option<UserId>, id: &UserId) -> Result<AuthorProfile, Error>;
}
