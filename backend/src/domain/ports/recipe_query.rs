//! Driving port for reading recipes.

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{Error, RecipeDetail, RecipeFilter, RecipeId, UserId};

/// Domain use-case port for recipe reads.
///
/// `viewer` is `None` for anonymous callers; viewer-relative flags are then
/// all `false` and bookmark filters are ignored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    async fn list_recipes(
        &self,
        viewer: Option<UserId>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<PageSlice<RecipeDetail>, Error>;

    async fn get_recipe(&self, viewer: Option<UserId>, id: RecipeId)
    -> Result<RecipeDetail, Error>;
}
