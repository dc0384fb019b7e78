//! Request and response bodies for the recipe API.
//!
//! Recipes have two renderings: [`RecipeResponse`] for reads, carrying the
//! viewer's flags, and [`RecipeWriteResponse`] for create and update results,
//! which omits them. Favourites, cart entries and subscription previews use
//! [`RecipeSummaryResponse`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthorProfile, AuthoredRecipe, Ingredient, IngredientLine, IngredientLinePayload, Recipe,
    RecipeDetail, RecipePayload, RecipeSummary, Subscription, Tag, User,
};

/// Tag as returned by the catalogue endpoints and inside recipes.
#[derive(Debug, Serialize, ToSchema)]
pub struct TagResponse {
    pub id: i64,
    #[schema(example = "Breakfast")]
    pub name: String,
    #[schema(example = "#E26C2D")]
    pub color: String,
    #[schema(example = "breakfast")]
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.get(),
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

/// Ingredient as returned by the catalogue endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: i64,
    #[schema(example = "Sugar")]
    pub name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id.get(),
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i16,
}

impl From<IngredientLine> for RecipeIngredientResponse {
    fn from(line: IngredientLine) -> Self {
        Self {
            id: line.ingredient.id.get(),
            name: line.ingredient.name,
            measurement_unit: line.ingredient.measurement_unit,
            amount: line.amount.get(),
        }
    }
}

/// Public user fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// A user as seen by the viewer.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<AuthorProfile> for AuthorResponse {
    fn from(profile: AuthorProfile) -> Self {
        let AuthorProfile {
            user,
            is_subscribed,
        } = profile;
        Self {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

/// Fields shared by both full recipe renderings.
struct RecipeBody {
    id: i64,
    tags: Vec<TagResponse>,
    ingredients: Vec<RecipeIngredientResponse>,
    name: String,
    image: String,
    text: String,
    cooking_time: i16,
}

impl From<Recipe> for RecipeBody {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.get(),
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            name: recipe.name,
            image: recipe.image.as_str().to_owned(),
            text: recipe.text,
            cooking_time: recipe.cooking_time.get(),
        }
    }
}

/// Recipe detail for list and detail reads.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: AuthorResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i16,
}

impl From<RecipeDetail> for RecipeResponse {
    fn from(detail: RecipeDetail) -> Self {
        let RecipeDetail {
            recipe,
            author,
            flags,
        } = detail;
        let body = RecipeBody::from(recipe);
        Self {
            id: body.id,
            tags: body.tags,
            author: author.into(),
            ingredients: body.ingredients,
            is_favorited: flags.is_favorited,
            is_in_shopping_cart: flags.is_in_shopping_cart,
            name: body.name,
            image: body.image,
            text: body.text,
            cooking_time: body.cooking_time,
        }
    }
}

/// Recipe returned by create and update.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeWriteResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i16,
}

impl From<AuthoredRecipe> for RecipeWriteResponse {
    fn from(authored: AuthoredRecipe) -> Self {
        let AuthoredRecipe { recipe, author } = authored;
        let body = RecipeBody::from(recipe);
        Self {
            id: body.id,
            tags: body.tags,
            author: author.into(),
            ingredients: body.ingredients,
            name: body.name,
            image: body.image,
            text: body.text,
            cooking_time: body.cooking_time,
        }
    }
}

/// Short recipe form.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeSummaryResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i16,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id.get(),
            name: summary.name,
            image: summary.image.as_str().to_owned(),
            cooking_time: summary.cooking_time.get(),
        }
    }
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        let author = AuthorResponse::from(subscription.author);
        Self {
            id: author.id,
            email: author.email,
            username: author.username,
            first_name: author.first_name,
            last_name: author.last_name,
            is_subscribed: author.is_subscribed,
            recipes: subscription
                .recipes
                .into_iter()
                .map(RecipeSummaryResponse::from)
                .collect(),
            recipes_count: subscription.recipes_count,
        }
    }
}

/// One `{id, amount}` entry of a recipe request.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct IngredientAmountRequest {
    pub id: i64,
    #[schema(example = 250)]
    pub amount: i64,
}

/// Body of `POST /api/recipes` and `PATCH /api/recipes/{id}`.
///
/// Updates replace the whole recipe, so both use the same shape. A missing or
/// `null` image, tag list or ingredient list is treated as empty so domain
/// validation reports it against its own field.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecipeRequest {
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    #[serde(default)]
    pub tags: Option<Vec<i64>>,
    /// `data:image/<type>;base64,<payload>` URI.
    #[serde(default)]
    #[schema(example = "data:image/png;base64,iVBORw0KGgo=")]
    pub image: Option<String>,
    pub name: String,
    pub text: String,
    #[schema(example = 30)]
    pub cooking_time: i64,
}

impl From<RecipeRequest> for RecipePayload {
    fn from(request: RecipeRequest) -> Self {
        Self {
            name: request.name,
            image: request.image.unwrap_or_default(),
            text: request.text,
            cooking_time: request.cooking_time,
            tag_ids: request.tags.unwrap_or_default(),
            ingredients: request
                .ingredients
                .unwrap_or_default()
                .into_iter()
                .map(|line| IngredientLinePayload {
                    ingredient_id: line.id,
                    amount: line.amount,
                })
                .collect(),
        }
    }
}
