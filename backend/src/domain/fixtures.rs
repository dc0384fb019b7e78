//! Builders for domain values shared by unit tests across the crate.

use chrono::{TimeZone, Utc};

use super::{
    Amount, CookingTime, Ingredient, IngredientId, IngredientLine, IngredientLinePayload, Recipe,
    RecipeId, RecipeImage, RecipePayload, Tag, TagId, User, UserId,
};

pub(crate) const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

pub(crate) fn user(username: &str) -> User {
    User {
        id: UserId::random(),
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Test".to_owned(),
        last_name: username.to_owned(),
    }
}

pub(crate) fn tag(id: i64, slug: &str) -> Tag {
    Tag {
        id: TagId::new(id),
        name: slug.to_uppercase(),
        color: "#E26C2D".to_owned(),
        slug: slug.to_owned(),
    }
}

pub(crate) fn ingredient(id: i64, name: &str, unit: &str) -> Ingredient {
    Ingredient {
        id: IngredientId::new(id),
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

/// A stored recipe with one tag and one ingredient line.
pub(crate) fn recipe(id: i64, author: &UserId) -> Recipe {
    Recipe {
        id: RecipeId::new(id),
        author: author.clone(),
        name: format!("Recipe {id}"),
        image: RecipeImage::from_stored(format!("recipes/images/{id}.png")),
        text: "Mix and bake.".to_owned(),
        cooking_time: CookingTime::new(30).expect("valid cooking time"),
        tags: vec![tag(1, "dinner")],
        ingredients: vec![IngredientLine {
            ingredient: ingredient(10, "Flour", "g"),
            amount: Amount::new(10, 250).expect("valid amount"),
        }],
        created_at: Utc
            .timestamp_opt(1_700_000_000 + id, 0)
            .single()
            .expect("valid timestamp"),
    }
}

/// A payload that validates against tag 1 and ingredient 10.
pub(crate) fn payload() -> RecipePayload {
    RecipePayload {
        name: "Shortbread".to_owned(),
        image: PNG_DATA_URI.to_owned(),
        text: "Rub butter into flour.".to_owned(),
        cooking_time: 25,
        tag_ids: vec![1],
        ingredients: vec![IngredientLinePayload {
            ingredient_id: 10,
            amount: 250,
        }],
    }
}
