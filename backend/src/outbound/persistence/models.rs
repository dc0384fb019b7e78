//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Amount, CookingTime, Ingredient, IngredientId, IngredientLine, Recipe, RecipeId, RecipeImage,
    RecipeSummary, Tag, TagId, User, UserId,
};

use super::schema::{
    ingredients, recipe_ingredients, recipe_relations, recipe_tags, recipes, subscriptions, tags,
    users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub author_id: Uuid,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i16,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new recipes; `created_at` uses the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub author_id: Uuid,
    pub name: &'a str,
    pub image: &'a str,
    pub text: &'a str,
    pub cooking_time: i16,
}

/// Changeset applied when a recipe is replaced.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeUpdate<'a> {
    pub name: &'a str,
    pub image: &'a str,
    pub text: &'a str,
    pub cooking_time: i16,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_tags)]
pub(crate) struct NewRecipeTagRow {
    pub recipe_id: i64,
    pub tag_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_ingredients)]
pub(crate) struct NewRecipeIngredientRow {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub amount: i16,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipe_relations)]
pub(crate) struct NewRecipeRelationRow<'a> {
    pub user_id: Uuid,
    pub recipe_id: i64,
    pub kind: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub(crate) struct NewSubscriptionRow {
    pub follower_id: Uuid,
    pub author_id: Uuid,
}

// ---------------------------------------------------------------------------
// Row-to-domain converters
// ---------------------------------------------------------------------------

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Self {
            id: TagId::new(row.id),
            name: row.name,
            color: row.color,
            slug: row.slug,
        }
    }
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: IngredientId::new(row.id),
            name: row.name,
            measurement_unit: row.measurement_unit,
        }
    }
}

impl RecipeRow {
    fn cooking_time(&self) -> Result<CookingTime, String> {
        CookingTime::new(i64::from(self.cooking_time))
            .map_err(|err| format!("recipe {} has invalid stored data: {err}", self.id))
    }

    /// Short form without tags or ingredient lines.
    pub(crate) fn into_summary(self) -> Result<RecipeSummary, String> {
        let cooking_time = self.cooking_time()?;
        Ok(RecipeSummary {
            id: RecipeId::new(self.id),
            name: self.name,
            image: RecipeImage::from_stored(self.image),
            cooking_time,
        })
    }

    /// Full aggregate with its already loaded children.
    pub(crate) fn into_recipe(
        self,
        tags: Vec<Tag>,
        lines: Vec<(IngredientRow, i16)>,
    ) -> Result<Recipe, String> {
        let cooking_time = self.cooking_time()?;
        let ingredients = lines
            .into_iter()
            .map(|(row, amount)| {
                let amount = Amount::new(row.id, i64::from(amount))
                    .map_err(|err| format!("recipe {} has invalid stored data: {err}", self.id))?;
                Ok(IngredientLine {
                    ingredient: row.into(),
                    amount,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;
        Ok(Recipe {
            id: RecipeId::new(self.id),
            author: UserId::from_uuid(self.author_id),
            name: self.name,
            image: RecipeImage::from_stored(self.image),
            text: self.text,
            cooking_time,
            tags,
            ingredients,
            created_at: self.created_at,
        })
    }
}
