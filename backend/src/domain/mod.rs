//! Domain primitives, ports and services.
//!
//! Purpose: define the recipe-sharing model (catalogue, recipes, bookmarks,
//! subscriptions) and the use cases inbound adapters drive. Nothing here
//! knows about HTTP or SQL; adapters plug in through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Recipe, RecipeDraft, RecipePayload: the aggregate and its validation.
//! - RecipeFilter: viewer-relative list filtering.
//! - ShoppingList: cart aggregation.
//! - `*Service` types implementing the driving ports.

pub mod catalogue;
pub mod error;
mod ids;
pub mod ports;
pub mod recipe;
pub mod recipe_filter;
pub mod recipe_view;
pub mod relations;
pub mod shopping_list;
pub mod trace_id;
pub mod user;

mod catalogue_service;
mod recipe_authoring_service;
mod recipe_query_service;
mod recipe_relations_service;
mod shopping_list_service;
mod subscription_service;
mod user_directory_service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use self::catalogue::{Ingredient, IngredientId, IngredientSearch, Tag, TagId};
pub use self::catalogue_service::CatalogueService;
pub use self::error::{Error, ErrorCode};
pub use self::recipe::{
    Amount, CookingTime, DraftLine, IngredientLine, IngredientLinePayload, KnownReferences,
    RECIPE_NAME_MAX, Recipe, RecipeDraft, RecipeId, RecipeImage, RecipePayload, RecipeSummary,
    RecipeValidationError,
};
pub use self::recipe_authoring_service::RecipeAuthoringService;
pub use self::recipe_filter::{RecipeFilter, RecipeListQuery, RelationRestriction};
pub use self::recipe_query_service::RecipeQueryService;
pub use self::recipe_relations_service::RecipeRelationsService;
pub use self::recipe_view::{AuthoredRecipe, RecipeDetail, Subscription};
pub use self::relations::{RelationKind, ViewerFlags};
pub use self::shopping_list::{ShoppingList, ShoppingListItem};
pub use self::shopping_list_service::ShoppingListService;
pub use self::subscription_service::SubscriptionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{AuthorProfile, User, UserId, UserValidationError};
pub use self::user_directory_service::UserDirectoryService;
