//! Tables and row-level rules behind [`MemoryStore`](super::MemoryStore).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::domain::{
    CookingTime, DraftLine, Ingredient, IngredientId, IngredientLine, Recipe, RecipeDraft,
    RecipeId, RecipeImage, RecipeListQuery, RelationKind, Tag, TagId, User, UserId,
};

/// A recipe row plus its join rows.
#[derive(Debug, Clone)]
pub(super) struct StoredRecipe {
    pub(super) author: UserId,
    pub(super) name: String,
    pub(super) image: RecipeImage,
    pub(super) text: String,
    pub(super) cooking_time: CookingTime,
    pub(super) tags: Vec<TagId>,
    pub(super) lines: Vec<DraftLine>,
    pub(super) created_at: DateTime<Utc>,
}

impl StoredRecipe {
    pub(super) fn new(author: UserId, draft: &RecipeDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            author,
            name: draft.name.clone(),
            image: draft.image.clone(),
            text: draft.text.clone(),
            cooking_time: draft.cooking_time,
            tags: draft.tag_ids.clone(),
            lines: draft.lines.clone(),
            created_at,
        }
    }

    pub(super) fn apply(&mut self, draft: &RecipeDraft) {
        self.name.clone_from(&draft.name);
        self.image = draft.image.clone();
        self.text.clone_from(&draft.text);
        self.cooking_time = draft.cooking_time;
        self.tags.clone_from(&draft.tag_ids);
        self.lines.clone_from(&draft.lines);
    }
}

#[derive(Debug, Default)]
pub(super) struct State {
    pub(super) users: BTreeMap<UserId, User>,
    pub(super) tags: BTreeMap<TagId, Tag>,
    pub(super) ingredients: BTreeMap<IngredientId, Ingredient>,
    pub(super) recipes: BTreeMap<RecipeId, StoredRecipe>,
    pub(super) relations: BTreeSet<(UserId, RecipeId, RelationKind)>,
    /// (follower, author) in subscription order.
    pub(super) subscriptions: Vec<(UserId, UserId)>,
    last_tag: i64,
    last_ingredient: i64,
    last_recipe: i64,
}

impl State {
    pub(super) fn add_tag(&mut self, name: &str, color: &str, slug: &str) -> Tag {
        self.last_tag += 1;
        let tag = Tag {
            id: TagId::new(self.last_tag),
            name: name.to_owned(),
            color: color.to_owned(),
            slug: slug.to_owned(),
        };
        self.tags.insert(tag.id, tag.clone());
        tag
    }

    pub(super) fn add_ingredient(&mut self, name: &str, measurement_unit: &str) -> Ingredient {
        self.last_ingredient += 1;
        let ingredient = Ingredient {
            id: IngredientId::new(self.last_ingredient),
            name: name.to_owned(),
            measurement_unit: measurement_unit.to_owned(),
        };
        self.ingredients.insert(ingredient.id, ingredient.clone());
        ingredient
    }

    pub(super) fn next_recipe_id(&mut self) -> RecipeId {
        self.last_recipe += 1;
        RecipeId::new(self.last_recipe)
    }

    /// Whether `author` already has a recipe called `name`, ignoring `except`.
    pub(super) fn name_taken(&self, author: &UserId, name: &str, except: Option<RecipeId>) -> bool {
        self.recipes
            .iter()
            .any(|(id, row)| Some(*id) != except && &row.author == author && row.name == name)
    }

    /// First tag or ingredient the draft names that is not in the catalogue.
    pub(super) fn missing_reference(&self, draft: &RecipeDraft) -> Option<String> {
        if let Some(tag) = draft.tag_ids.iter().find(|id| !self.tags.contains_key(id)) {
            return Some(format!("tag {tag} does not exist"));
        }
        draft
            .lines
            .iter()
            .find(|line| !self.ingredients.contains_key(&line.ingredient_id))
            .map(|line| format!("ingredient {} does not exist", line.ingredient_id))
    }

    pub(super) fn matches(&self, query: &RecipeListQuery, id: RecipeId, row: &StoredRecipe) -> bool {
        if query.author.as_ref().is_some_and(|author| author != &row.author) {
            return false;
        }
        if !query.tag_slugs.is_empty() {
            let tagged = row.tags.iter().any(|tag_id| {
                self.tags
                    .get(tag_id)
                    .is_some_and(|tag| query.tag_slugs.contains(&tag.slug))
            });
            if !tagged {
                return false;
            }
        }
        query.relations.iter().all(|rule| {
            self.relations
                .contains(&(rule.user.clone(), id, rule.kind))
        })
    }

    /// Recipes in list order: oldest first, ties broken by id.
    pub(super) fn ordered_recipes(&self) -> Vec<(RecipeId, &StoredRecipe)> {
        let mut rows: Vec<(RecipeId, &StoredRecipe)> =
            self.recipes.iter().map(|(id, row)| (*id, row)).collect();
        rows.sort_by_key(|(id, row)| (row.created_at, *id));
        rows
    }

    /// Join a stored row with its catalogue entries.
    pub(super) fn hydrate(&self, id: RecipeId, row: &StoredRecipe) -> Recipe {
        let mut tags: Vec<Tag> = row
            .tags
            .iter()
            .filter_map(|tag_id| self.tags.get(tag_id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        let mut ingredients: Vec<IngredientLine> = row
            .lines
            .iter()
            .filter_map(|line| {
                self.ingredients
                    .get(&line.ingredient_id)
                    .map(|ingredient| IngredientLine {
                        ingredient: ingredient.clone(),
                        amount: line.amount,
                    })
            })
            .collect();
        ingredients.sort_by(|a, b| a.ingredient.name.cmp(&b.ingredient.name));
        Recipe {
            id,
            author: row.author.clone(),
            name: row.name.clone(),
            image: row.image.clone(),
            text: row.text.clone(),
            cooking_time: row.cooking_time,
            tags,
            ingredients,
            created_at: row.created_at,
        }
    }

    /// Remove a recipe and every relation row pointing at it.
    pub(super) fn delete_recipe(&mut self, id: RecipeId) -> bool {
        if self.recipes.remove(&id).is_none() {
            return false;
        }
        self.relations.retain(|(_, recipe, _)| *recipe != id);
        true
    }
}

/// Convert a page offset or limit into a slice bound.
pub(super) fn bound(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
