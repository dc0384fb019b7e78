//! Driving port for writing recipes.
//!
//! Only the author of a recipe may change or delete it. Payloads are
//! validated in full before storage is touched.

use async_trait::async_trait;

use crate::domain::{AuthoredRecipe, Error, RecipeId, RecipePayload, UserId};

/// Domain use-case port for recipe authoring.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Publish a new recipe authored by `author`.
    async fn create_recipe(
        &self,
        author: &UserId,
        payload: RecipePayload,
    ) -> Result<AuthoredRecipe, Error>;

    /// Replace a recipe's content. Tags and ingredient lines are replaced
    /// wholesale.
    async fn update_recipe(
        &self,
        actor: &UserId,
        id: RecipeId,
        payload: RecipePayload,
    ) -> Result<AuthoredRecipe, Error>;

    /// Delete a recipe along with its bookmarks.
    async fn delete_recipe(&self, actor: &UserId, id: RecipeId) -> Result<(), Error>;
}
