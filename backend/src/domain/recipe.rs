//! Recipe aggregate and the validation applied to client submissions.
//!
//! A [`Recipe`] owns its tag links and ingredient lines. Writes arrive as an
//! unvalidated [`RecipePayload`] and must pass [`RecipeDraft::parse`] before
//! anything touches storage. Parsing is pure: the set of tag and ingredient
//! ids that exist is loaded up front and passed in as [`KnownReferences`].
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. image present and non-empty (a `data:` URI must carry a decodable
//!    base64 image payload)
//! 2. cooking time of at least one minute
//! 3. at least one tag, with no tag repeated
//! 4. at least one ingredient line
//! 5. every amount at least one
//! 6. every ingredient exists
//! 7. no ingredient listed twice
//! 8. every tag exists, then name and text checks
//!
//! Duplicate ingredient lines are rejected, never merged.

use std::collections::HashSet;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::catalogue::{Ingredient, IngredientId, Tag, TagId};
use super::ids::numeric_id;
use super::user::UserId;

/// Maximum recipe name length in characters.
pub const RECIPE_NAME_MAX: usize = 200;

numeric_id! {
    /// Identifier of a [`Recipe`].
    RecipeId
}

/// Reasons a recipe submission is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecipeValidationError {
    #[error("image must not be empty")]
    EmptyImage,
    #[error("image must be a base64 encoded data URI or a stored image reference")]
    InvalidImage,
    #[error("cooking time must be between 1 and {max} minutes, got {value}")]
    InvalidCookingTime { value: i64, max: i16 },
    #[error("at least one tag is required")]
    NoTags,
    #[error("tag {tag_id} is listed more than once")]
    DuplicateTags { tag_id: i64 },
    #[error("at least one ingredient is required")]
    NoIngredients,
    #[error("amount for ingredient {ingredient_id} must be between 1 and {max}, got {amount}")]
    InvalidAmount {
        ingredient_id: i64,
        amount: i64,
        max: i16,
    },
    #[error("ingredient {ingredient_id} does not exist")]
    UnknownIngredient { ingredient_id: i64 },
    #[error("ingredient {ingredient_id} is listed more than once")]
    DuplicateIngredient { ingredient_id: i64 },
    #[error("tag {tag_id} does not exist")]
    UnknownTag { tag_id: i64 },
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("text must not be empty")]
    EmptyText,
}

impl RecipeValidationError {
    /// Payload field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyImage | Self::InvalidImage => "image",
            Self::InvalidCookingTime { .. } => "cooking_time",
            Self::NoTags | Self::DuplicateTags { .. } | Self::UnknownTag { .. } => "tags",
            Self::NoIngredients
            | Self::InvalidAmount { .. }
            | Self::UnknownIngredient { .. }
            | Self::DuplicateIngredient { .. } => "ingredients",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyText => "text",
        }
    }

    /// Machine-readable failure code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyImage => "empty_image",
            Self::InvalidImage => "invalid_image",
            Self::InvalidCookingTime { .. } => "invalid_cooking_time",
            Self::NoTags => "no_tags",
            Self::DuplicateTags { .. } => "duplicate_tags",
            Self::NoIngredients => "no_ingredients",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::UnknownIngredient { .. } => "unknown_ingredient",
            Self::DuplicateIngredient { .. } => "duplicate_ingredient",
            Self::UnknownTag { .. } => "unknown_tag",
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::EmptyText => "empty_text",
        }
    }
}

/// Positive small integer used for cooking times and amounts.
fn positive_small(value: i64) -> Option<i16> {
    i16::try_from(value).ok().filter(|parsed| *parsed >= 1)
}

/// Cooking time in minutes, at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CookingTime(i16);

impl CookingTime {
    /// Validate a raw cooking time.
    pub fn new(minutes: i64) -> Result<Self, RecipeValidationError> {
        positive_small(minutes)
            .map(Self)
            .ok_or(RecipeValidationError::InvalidCookingTime {
                value: minutes,
                max: i16::MAX,
            })
    }

    /// Minutes.
    pub const fn get(self) -> i16 {
        self.0
    }
}

/// Quantity of an ingredient in its measurement unit, at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(i16);

impl Amount {
    /// Validate a raw amount for `ingredient_id`.
    pub fn new(ingredient_id: i64, amount: i64) -> Result<Self, RecipeValidationError> {
        positive_small(amount)
            .map(Self)
            .ok_or(RecipeValidationError::InvalidAmount {
                ingredient_id,
                amount,
                max: i16::MAX,
            })
    }

    /// Quantity.
    pub const fn get(self) -> i16 {
        self.0
    }
}

/// Recipe picture: either a `data:image/...;base64,` URI submitted by a client
/// or a reference to an already stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeImage(String);

impl RecipeImage {
    /// Validate a submitted image value.
    ///
    /// # Examples
    /// ```
    /// use larder::domain::{RecipeImage, RecipeValidationError};
    ///
    /// assert!(RecipeImage::new("data:image/png;base64,iVBORw0KGgo=").is_ok());
    /// assert!(RecipeImage::new("recipes/images/soup.png").is_ok());
    /// assert_eq!(RecipeImage::new(" "), Err(RecipeValidationError::EmptyImage));
    /// assert_eq!(
    ///     RecipeImage::new("data:image/png;base64,"),
    ///     Err(RecipeValidationError::InvalidImage)
    /// );
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, RecipeValidationError> {
        let value = raw.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyImage);
        }
        if let Some(uri) = trimmed.strip_prefix("data:") {
            validate_data_uri(uri)?;
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap a value read back from storage.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// The stored representation.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn validate_data_uri(uri: &str) -> Result<(), RecipeValidationError> {
    let (media, payload) = uri
        .split_once(',')
        .ok_or(RecipeValidationError::InvalidImage)?;
    let media_type = media
        .strip_suffix(";base64")
        .ok_or(RecipeValidationError::InvalidImage)?;
    if !media_type.starts_with("image/") {
        return Err(RecipeValidationError::InvalidImage);
    }
    match STANDARD.decode(payload) {
        Ok(bytes) if !bytes.is_empty() => Ok(()),
        _ => Err(RecipeValidationError::InvalidImage),
    }
}

/// One ingredient and its amount within a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient: Ingredient,
    pub amount: Amount,
}

/// The recipe aggregate as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub author: UserId,
    pub name: String,
    pub image: RecipeImage,
    pub text: String,
    pub cooking_time: CookingTime,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientLine>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Short form used by favourites, cart entries and subscriptions.
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            cooking_time: self.cooking_time,
        }
    }
}

/// Short recipe view: id, name, image and cooking time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    pub image: RecipeImage,
    pub cooking_time: CookingTime,
}

/// One submitted ingredient line, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLinePayload {
    pub ingredient_id: i64,
    pub amount: i64,
}

/// Recipe fields as submitted by a client, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePayload {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
    pub tag_ids: Vec<i64>,
    pub ingredients: Vec<IngredientLinePayload>,
}

impl RecipePayload {
    /// Tag ids named by the payload, deduplicated.
    pub fn referenced_tags(&self) -> Vec<TagId> {
        let mut ids: Vec<TagId> = self.tag_ids.iter().copied().map(TagId::new).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Ingredient ids named by the payload, deduplicated.
    pub fn referenced_ingredients(&self) -> Vec<IngredientId> {
        let mut ids: Vec<IngredientId> = self
            .ingredients
            .iter()
            .map(|line| IngredientId::new(line.ingredient_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Tag and ingredient ids known to exist at validation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownReferences {
    tags: HashSet<TagId>,
    ingredients: HashSet<IngredientId>,
}

impl KnownReferences {
    /// Build from the ids found in the catalogue.
    pub fn new(
        tags: impl IntoIterator<Item = TagId>,
        ingredients: impl IntoIterator<Item = IngredientId>,
    ) -> Self {
        Self {
            tags: tags.into_iter().collect(),
            ingredients: ingredients.into_iter().collect(),
        }
    }

    fn has_tag(&self, id: TagId) -> bool {
        self.tags.contains(&id)
    }

    fn has_ingredient(&self, id: IngredientId) -> bool {
        self.ingredients.contains(&id)
    }
}

/// A validated ingredient line ready to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftLine {
    pub ingredient_id: IngredientId,
    pub amount: Amount,
}

/// A validated recipe submission ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub image: RecipeImage,
    pub text: String,
    pub cooking_time: CookingTime,
    pub tag_ids: Vec<TagId>,
    pub lines: Vec<DraftLine>,
}

impl RecipeDraft {
    /// Validate `payload` against the known catalogue references.
    ///
    /// # Examples
    /// ```
    /// use larder::domain::{
    ///     IngredientId, IngredientLinePayload, KnownReferences, RecipeDraft, RecipePayload,
    ///     RecipeValidationError, TagId,
    /// };
    ///
    /// let known = KnownReferences::new([TagId::new(1)], [IngredientId::new(5)]);
    /// let payload = RecipePayload {
    ///     name: "Porridge".to_owned(),
    ///     image: "recipes/images/porridge.png".to_owned(),
    ///     text: "Simmer oats in milk.".to_owned(),
    ///     cooking_time: 10,
    ///     tag_ids: vec![1],
    ///     ingredients: vec![
    ///         IngredientLinePayload { ingredient_id: 5, amount: 100 },
    ///         IngredientLinePayload { ingredient_id: 5, amount: 50 },
    ///     ],
    /// };
    /// assert_eq!(
    ///     RecipeDraft::parse(payload, &known),
    ///     Err(RecipeValidationError::DuplicateIngredient { ingredient_id: 5 })
    /// );
    /// ```
    pub fn parse(
        payload: RecipePayload,
        known: &KnownReferences,
    ) -> Result<Self, RecipeValidationError> {
        let RecipePayload {
            name,
            image,
            text,
            cooking_time,
            tag_ids,
            ingredients,
        } = payload;

        let image = RecipeImage::new(image)?;
        let cooking_time = CookingTime::new(cooking_time)?;
        let tag_ids = parse_tags(&tag_ids)?;
        let lines = parse_lines(&ingredients, known)?;

        if let Some(missing) = tag_ids.iter().find(|id| !known.has_tag(**id)) {
            return Err(RecipeValidationError::UnknownTag {
                tag_id: missing.get(),
            });
        }
        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        if name.chars().count() > RECIPE_NAME_MAX {
            return Err(RecipeValidationError::NameTooLong {
                max: RECIPE_NAME_MAX,
            });
        }
        if text.trim().is_empty() {
            return Err(RecipeValidationError::EmptyText);
        }

        Ok(Self {
            name,
            image,
            text,
            cooking_time,
            tag_ids,
            lines,
        })
    }
}

fn parse_tags(raw: &[i64]) -> Result<Vec<TagId>, RecipeValidationError> {
    if raw.is_empty() {
        return Err(RecipeValidationError::NoTags);
    }
    let mut seen = HashSet::with_capacity(raw.len());
    for id in raw {
        if !seen.insert(*id) {
            return Err(RecipeValidationError::DuplicateTags { tag_id: *id });
        }
    }
    Ok(raw.iter().copied().map(TagId::new).collect())
}

fn parse_lines(
    raw: &[IngredientLinePayload],
    known: &KnownReferences,
) -> Result<Vec<DraftLine>, RecipeValidationError> {
    if raw.is_empty() {
        return Err(RecipeValidationError::NoIngredients);
    }
    let amounts = raw
        .iter()
        .map(|line| Amount::new(line.ingredient_id, line.amount))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(line) = raw
        .iter()
        .find(|line| !known.has_ingredient(IngredientId::new(line.ingredient_id)))
    {
        return Err(RecipeValidationError::UnknownIngredient {
            ingredient_id: line.ingredient_id,
        });
    }
    let mut seen = HashSet::with_capacity(raw.len());
    for line in raw {
        if !seen.insert(line.ingredient_id) {
            return Err(RecipeValidationError::DuplicateIngredient {
                ingredient_id: line.ingredient_id,
            });
        }
    }
    Ok(raw
        .iter()
        .zip(amounts)
        .map(|(line, amount)| DraftLine {
            ingredient_id: IngredientId::new(line.ingredient_id),
            amount,
        })
        .collect())
}
