//! Port abstraction for favourites and shopping cart entries.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, RelationKind, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe relation adapters.
    pub enum RecipeRelationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe relation connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe relation query failed: {message}",
        /// The relation is already recorded.
        AlreadyExists => "recipe is already in the list",
        /// The recipe does not exist.
        MissingRecipe => "recipe not found",
        /// The acting user has no account.
        MissingUser => "user account not found",
    }
}

/// Port for per-user recipe bookmarks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRelationRepository: Send + Sync {
    /// Record a bookmark. Fails with `AlreadyExists` on a repeat and with
    /// `MissingRecipe` or `MissingUser` when either side is unknown.
    async fn insert(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<(), RecipeRelationRepositoryError>;

    /// Remove a bookmark. Returns `false` when there was none.
    async fn delete(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<bool, RecipeRelationRepositoryError>;

    /// Every recipe in the user's `kind` list, oldest bookmark first.
    async fn recipe_ids(
        &self,
        kind: RelationKind,
        user: &UserId,
    ) -> Result<Vec<RecipeId>, RecipeRelationRepositoryError>;

    /// Bookmarks `user` holds on any of `recipes`.
    async fn relations_for(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<(RecipeId, RelationKind)>, RecipeRelationRepositoryError>;
}

impl From<RecipeRelationRepositoryError> for Error {
    fn from(err: RecipeRelationRepositoryError) -> Self {
        match err {
            RecipeRelationRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("relation repository unavailable: {message}"))
            }
            RecipeRelationRepositoryError::Query { message } => {
                Error::internal(format!("relation repository error: {message}"))
            }
            err @ RecipeRelationRepositoryError::AlreadyExists => Error::conflict(err.to_string()),
            err @ RecipeRelationRepositoryError::MissingRecipe => {
                Error::not_found(err.to_string())
            }
            err @ RecipeRelationRepositoryError::MissingUser => {
                Error::unauthorized(err.to_string())
            }
        }
    }
}
