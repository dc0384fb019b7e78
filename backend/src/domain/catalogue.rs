//! Reference data: tags and ingredients.
//!
//! Both are administrator-managed and read-only through the API. Recipes point
//! at them by id; the database refuses to delete a tag or ingredient that is
//! still referenced.

use super::ids::numeric_id;

numeric_id! {
    /// Identifier of a [`Tag`].
    TagId
}

numeric_id! {
    /// Identifier of an [`Ingredient`].
    IngredientId
}

/// A recipe label such as "Breakfast".
///
/// `name` and `slug` are unique across tags; `color` is a `#RRGGBB` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// An ingredient with its unit of measure.
///
/// The (`name`, `measurement_unit`) pair is unique, so "Sugar/g" and
/// "Sugar/tbsp" are distinct ingredients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub measurement_unit: String,
}

/// Case-insensitive prefix filter for ingredient search.
///
/// Blank input means "no filter".
///
/// # Examples
/// ```
/// use larder::domain::IngredientSearch;
///
/// let search = IngredientSearch::new(Some("  Sug ".to_owned()));
/// assert_eq!(search.prefix(), Some("sug"));
/// assert!(search.matches("Sugar"));
/// assert!(!search.matches("Brown sugar"));
/// assert!(IngredientSearch::new(Some("   ".to_owned())).prefix().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSearch {
    prefix: Option<String>,
}

impl IngredientSearch {
    /// Normalise a raw `name` query parameter.
    pub fn new(raw: Option<String>) -> Self {
        let prefix = raw
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());
        Self { prefix }
    }

    /// Lower-cased prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Whether `name` starts with the prefix, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.prefix
            .as_deref()
            .is_none_or(|prefix| name.to_lowercase().starts_with(prefix))
    }
}
