//! Port abstraction for recipe persistence.
//!
//! Adapters store the recipe row together with its tag links and ingredient
//! lines. `create` and `replace` must be atomic: either the whole draft is
//! written or nothing changes.

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::{
    Error, Recipe, RecipeDraft, RecipeId, RecipeListQuery, RecipeSummary, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe repository query failed: {message}",
        /// The author already has a recipe with this name.
        DuplicateName { name: String } =>
            "a recipe named '{name}' already exists for this author",
        /// A tag, ingredient or author vanished between validation and write.
        MissingReference { message: String } =>
            "recipe references a missing record: {message}",
        /// The recipe was deleted before the write completed.
        NotFound { recipe_id: i64 } =>
            "recipe {recipe_id} not found",
    }
}

/// Port for recipe storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Store a new recipe for `author` and return its id.
    async fn create(
        &self,
        author: &UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError>;

    /// Overwrite a recipe's fields, tags and ingredient lines.
    async fn replace(&self, id: RecipeId, draft: &RecipeDraft)
    -> Result<(), RecipeRepositoryError>;

    /// Delete a recipe and everything hanging off it. Returns `false` when
    /// no such recipe existed.
    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError>;

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Load the given recipes; missing ids are skipped. Results follow
    /// recipe ordering, not input order.
    async fn find_many(&self, ids: &[RecipeId]) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// One page of recipes matching `query`, oldest first, with the total
    /// number of matches.
    async fn list(
        &self,
        query: &RecipeListQuery,
        page: PageRequest,
    ) -> Result<PageSlice<Recipe>, RecipeRepositoryError>;

    /// The author's recipe count and their oldest recipes, truncated to
    /// `limit` when given.
    async fn summaries_by_author(
        &self,
        author: &UserId,
        limit: Option<u64>,
    ) -> Result<PageSlice<RecipeSummary>, RecipeRepositoryError>;
}

impl From<RecipeRepositoryError> for Error {
    fn from(err: RecipeRepositoryError) -> Self {
        match err {
            RecipeRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("recipe repository unavailable: {message}"))
            }
            RecipeRepositoryError::Query { message } => {
                Error::internal(format!("recipe repository error: {message}"))
            }
            err @ RecipeRepositoryError::DuplicateName { .. } => Error::conflict(err.to_string()),
            err @ (RecipeRepositoryError::MissingReference { .. }
            | RecipeRepositoryError::NotFound { .. }) => Error::not_found(err.to_string()),
        }
    }
}
