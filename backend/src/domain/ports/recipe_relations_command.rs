//! Driving port for favourites and the shopping cart.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, RecipeSummary, RelationKind, UserId};

/// Domain use-case port for recipe bookmarks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRelationsCommand: Send + Sync {
    /// Bookmark a recipe. A repeat fails with `conflict`; an unknown recipe
    /// with `not_found`.
    async fn add(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<RecipeSummary, Error>;

    /// Remove a bookmark. Fails with `not_found` when there is none.
    async fn remove(&self, kind: RelationKind, user: &UserId, recipe: RecipeId)
    -> Result<(), Error>;
}
