//! Builds shopping lists from the recipes in a user's cart.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{RecipeRelationRepository, RecipeRepository, ShoppingListQuery};
use crate::domain::{Error, RelationKind, ShoppingList, UserId};

/// Implements [`ShoppingListQuery`].
#[derive(Clone)]
pub struct ShoppingListService<R, L> {
    recipes: Arc<R>,
    relations: Arc<L>,
}

impl<R, L> ShoppingListService<R, L> {
    pub fn new(recipes: Arc<R>, relations: Arc<L>) -> Self {
        Self { recipes, relations }
    }
}

#[async_trait]
impl<R, L> ShoppingListQuery for ShoppingListService<R, L>
where
    R: RecipeRepository,
    L: RecipeRelationRepository,
{
    async fn shopping_list(&self, user: &UserId) -> Result<ShoppingList, Error> {
        let ids = self
            .relations
            .recipe_ids(RelationKind::ShoppingCart, user)
            .await?;
        if ids.is_empty() {
            return Ok(ShoppingList::default());
        }
        let recipes = self.recipes.find_many(&ids).await?;
        Ok(ShoppingList::aggregate(&recipes))
    }
}
