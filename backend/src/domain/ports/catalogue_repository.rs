//! Read-side port for tags and ingredients.
//!
//! The catalogue is reference data maintained by administrators; the API
//! only reads it. Recipe validation uses [`CatalogueRepository::known_references`]
//! to learn which submitted ids exist before anything is written.

use async_trait::async_trait;

use crate::domain::{
    Error, Ingredient, IngredientId, IngredientSearch, KnownReferences, Tag, TagId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading the catalogue.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue read connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "catalogue read query failed: {message}",
    }
}

/// Port for reading tags and ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Every tag, ordered by name.
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError>;

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, CatalogueRepositoryError>;

    /// Ingredients whose name starts with the search prefix, ordered by name
    /// then unit. An empty search returns every ingredient.
    async fn list_ingredients(
        &self,
        search: &IngredientSearch,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError>;

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError>;

    /// Subset of the given ids that exist.
    async fn known_references(
        &self,
        tag_ids: &[TagId],
        ingredient_ids: &[IngredientId],
    ) -> Result<KnownReferences, CatalogueRepositoryError>;
}

impl From<CatalogueRepositoryError> for Error {
    fn from(err: CatalogueRepositoryError) -> Self {
        match err {
            CatalogueRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("catalogue unavailable: {message}"))
            }
            CatalogueRepositoryError::Query { message } => {
                Error::internal(format!("catalogue error: {message}"))
            }
        }
    }
}
