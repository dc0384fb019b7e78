//! Favourite and shopping cart bookmarks.
//!
//! Both lists go through the same code path keyed by [`RelationKind`]. The
//! store's uniqueness constraint decides races: a second concurrent add
//! surfaces as a conflict.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    RecipeRelationRepository, RecipeRelationRepositoryError, RecipeRelationsCommand,
    RecipeRepository,
};
use crate::domain::{Error, RecipeId, RecipeSummary, RelationKind, UserId};

/// Bookmark service implementing [`RecipeRelationsCommand`].
#[derive(Clone)]
pub struct RecipeRelationsService<R, L> {
    recipes: Arc<R>,
    relations: Arc<L>,
}

impl<R, L> RecipeRelationsService<R, L> {
    pub fn new(recipes: Arc<R>, relations: Arc<L>) -> Self {
        Self { recipes, relations }
    }
}

fn map_insert_error(kind: RelationKind, id: RecipeId, err: RecipeRelationRepositoryError) -> Error {
    match err {
        RecipeRelationRepositoryError::AlreadyExists => Error::conflict(format!(
            "recipe {id} is already in your {}",
            kind.list_name()
        )),
        RecipeRelationRepositoryError::MissingRecipe => {
            Error::not_found(format!("recipe {id} not found"))
        }
        other => other.into(),
    }
}

#[async_trait]
impl<R, L> RecipeRelationsCommand for RecipeRelationsService<R, L>
where
    R: RecipeRepository,
    L: RecipeRelationRepository,
{
    async fn add(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<RecipeSummary, Error> {
        let found = self
            .recipes
            .find_by_id(recipe)
            .await?
            .ok_or_else(|| Error::not_found(format!("recipe {recipe} not found")))?;
        self.relations
            .insert(kind, user, recipe)
            .await
            .map_err(|err| map_insert_error(kind, recipe, err))?;
        debug!(%kind, recipe_id = %recipe, user = %user, "recipe bookmarked");
        Ok(found.summary())
    }

    async fn remove(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<(), Error> {
        if self.relations.delete(kind, user, recipe).await? {
            debug!(%kind, recipe_id = %recipe, user = %user, "bookmark removed");
            Ok(())
        } else {
            Err(Error::not_found(format!(
                "recipe {recipe} is not in your {}",
                kind.list_name()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::fixtures::recipe;
    use crate::domain::ports::{MockRecipeRelationRepository, MockRecipeRepository};
    use rstest::rstest;

    fn service(
        recipes: MockRecipeRepository,
        relations: MockRecipeRelationRepository,
    ) -> RecipeRelationsService<MockRecipeRepository, MockRecipeRelationRepository> {
        RecipeRelationsService::new(Arc::new(recipes), Arc::new(relations))
    }

    fn recipes_with(id: i64) -> MockRecipeRepository {
        let stored = recipe(id, &UserId::random());
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(stored)));
        recipes
    }

    #[rstest]
    #[case(RelationKind::Favorite)]
    #[case(RelationKind::ShoppingCart)]
    #[tokio::test]
    async fn add_returns_the_recipe_summary(#[case] kind: RelationKind) {
        let mut relations = MockRecipeRelationRepository::new();
        relations
            .expect_insert()
            .withf(move |k, _, id| *k == kind && *id == RecipeId::new(2))
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let summary = service(recipes_with(2), relations)
            .add(kind, &UserId::random(), RecipeId::new(2))
            .await
            .expect("bookmark added");
        assert_eq!(summary.id, RecipeId::new(2));
        assert_eq!(summary.name, "Recipe 2");
    }

    #[rstest]
    #[tokio::test]
    async fn repeated_add_is_a_conflict() {
        let mut relations = MockRecipeRelationRepository::new();
        relations
            .expect_insert()
            .return_once(|_, _, _| Err(RecipeRelationRepositoryError::already_exists()));

        let error = service(recipes_with(2), relations)
            .add(RelationKind::Favorite, &UserId::random(), RecipeId::new(2))
            .await
            .expect_err("duplicate");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "recipe 2 is already in your favourites");
    }

    #[rstest]
    #[tokio::test]
    async fn add_for_vanished_account_is_unauthorized() {
        let mut relations = MockRecipeRelationRepository::new();
        relations
            .expect_insert()
            .return_once(|_, _, _| Err(RecipeRelationRepositoryError::missing_user()));

        let error = service(recipes_with(2), relations)
            .add(RelationKind::Favorite, &UserId::random(), RecipeId::new(2))
            .await
            .expect_err("no account");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "user account not found");
    }

    #[rstest]
    #[tokio::test]
    async fn add_for_unknown_recipe_is_not_found() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_by_id().return_once(|_| Ok(None));
        let mut relations = MockRecipeRelationRepository::new();
        relations.expect_insert().never();

        let error = service(recipes, relations)
            .add(RelationKind::ShoppingCart, &UserId::random(), RecipeId::new(5))
            .await
            .expect_err("unknown recipe");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn remove_reports_missing_rows(
        #[case] existed: bool,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut relations = MockRecipeRelationRepository::new();
        relations
            .expect_delete()
            .return_once(move |_, _, _| Ok(existed));

        let outcome = service(MockRecipeRepository::new(), relations)
            .remove(RelationKind::ShoppingCart, &UserId::random(), RecipeId::new(1))
            .await;
        assert_eq!(outcome.err().map(|err| err.code()), expected);
    }
}
