//! Recipe create, update and delete.
//!
//! Every write follows the same sequence: authorise, load the catalogue ids
//! the payload names, validate the payload purely, persist it atomically,
//! then re-read the stored aggregate for the response.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CatalogueRepository, RecipeCommand, RecipeRepository, UserRepository,
};
use crate::domain::{
    AuthoredRecipe, Error, Recipe, RecipeDraft, RecipeId, RecipePayload, RecipeValidationError,
    User, UserId,
};

/// Recipe authoring service implementing [`RecipeCommand`].
#[derive(Clone)]
pub struct RecipeAuthoringService<C, R, U> {
    catalogue: Arc<C>,
    recipes: Arc<R>,
    users: Arc<U>,
}

impl<C, R, U> RecipeAuthoringService<C, R, U> {
    /// Create a new service with the given repositories.
    pub fn new(catalogue: Arc<C>, recipes: Arc<R>, users: Arc<U>) -> Self {
        Self {
            catalogue,
            recipes,
            users,
        }
    }
}

/// Render a validation failure as an `invalid_request` error whose details
/// name the offending field.
pub(crate) fn validation_error(err: RecipeValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

impl<C, R, U> RecipeAuthoringService<C, R, U>
where
    C: CatalogueRepository,
    R: RecipeRepository,
    U: UserRepository,
{
    async fn validate(&self, payload: RecipePayload) -> Result<RecipeDraft, Error> {
        let known = self
            .catalogue
            .known_references(
                &payload.referenced_tags(),
                &payload.referenced_ingredients(),
            )
            .await?;
        RecipeDraft::parse(payload, &known).map_err(validation_error)
    }

    async fn load(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("recipe {id} not found")))
    }

    async fn load_owned(&self, actor: &UserId, id: RecipeId) -> Result<Recipe, Error> {
        let recipe = self.load(id).await?;
        if recipe.author != *actor {
            return Err(Error::forbidden("only the author may change this recipe"));
        }
        Ok(recipe)
    }

    async fn author(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn authored(&self, id: RecipeId) -> Result<AuthoredRecipe, Error> {
        let recipe = self.load(id).await?;
        let author = self.author(&recipe.author).await?;
        Ok(AuthoredRecipe { recipe, author })
    }
}

#[async_trait]
impl<C, R, U> RecipeCommand for RecipeAuthoringService<C, R, U>
where
    C: CatalogueRepository,
    R: RecipeRepository,
    U: UserRepository,
{
    async fn create_recipe(
        &self,
        author: &UserId,
        payload: RecipePayload,
    ) -> Result<AuthoredRecipe, Error> {
        let draft = self.validate(payload).await?;
        let id = self.recipes.create(author, &draft).await?;
        info!(recipe_id = %id, author = %author, "recipe created");
        self.authored(id).await
    }

    async fn update_recipe(
        &self,
        actor: &UserId,
        id: RecipeId,
        payload: RecipePayload,
    ) -> Result<AuthoredRecipe, Error> {
        self.load_owned(actor, id).await?;
        let draft = self.validate(payload).await?;
        self.recipes.replace(id, &draft).await?;
        info!(recipe_id = %id, "recipe updated");
        self.authored(id).await
    }

    async fn delete_recipe(&self, actor: &UserId, id: RecipeId) -> Result<(), Error> {
        self.load_owned(actor, id).await?;
        if !self.recipes.delete(id).await? {
            return Err(Error::not_found(format!("recipe {id} not found")));
        }
        info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "recipe_authoring_service_tests.rs"]
mod tests;
