//! Driving port for browsing tags and ingredients.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, IngredientId, IngredientSearch, Tag, TagId};

/// Domain use-case port for catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, Error>;

    /// Fails with `not_found` for an unknown id.
    async fn get_tag(&self, id: TagId) -> Result<Tag, Error>;

    async fn list_ingredients(&self, search: IngredientSearch) -> Result<Vec<Ingredient>, Error>;

    /// Fails with `not_found` for an unknown id.
    async fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, Error>;
}
