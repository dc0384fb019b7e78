//! Viewer-relative read models assembled by the recipe services.

use super::recipe::{Recipe, RecipeSummary};
use super::relations::ViewerFlags;
use super::user::{AuthorProfile, User};

/// A recipe as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub author: AuthorProfile,
    pub flags: ViewerFlags,
}

/// A recipe returned from a create or update, with its author but without
/// viewer flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredRecipe {
    pub recipe: Recipe,
    pub author: User,
}

/// An author the viewer follows, with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub author: AuthorProfile,
    /// Total number of recipes by the author.
    pub recipes_count: u64,
    /// Oldest recipes first, truncated by `recipes_limit` when one is given.
    pub recipes: Vec<RecipeSummary>,
}
