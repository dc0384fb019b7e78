//! Driven-port implementations for [`MemoryStore`].

use async_trait::async_trait;
use chrono::Utc;
use pagination::{PageRequest, PageSlice};

use crate::domain::ports::{
    CatalogueRepository, CatalogueRepositoryError, RecipeRelationRepository,
    RecipeRelationRepositoryError, RecipeRepository, RecipeRepositoryError,
    SubscriptionRepository, SubscriptionRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Ingredient, IngredientId, IngredientSearch, KnownReferences, Recipe, RecipeDraft, RecipeId,
    RecipeListQuery, RecipeSummary, RelationKind, Tag, TagId, User, UserId,
};

use super::MemoryStore;
use super::state::{StoredRecipe, bound};

fn page_of<T>(items: impl Iterator<Item = T>, page: PageRequest) -> Vec<T> {
    items
        .skip(bound(page.offset()))
        .take(bound(page.limit()))
        .collect()
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

#[async_trait]
impl CatalogueRepository for MemoryStore {
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        let state = self.lock();
        let mut tags: Vec<Tag> = state.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, CatalogueRepositoryError> {
        Ok(self.lock().tags.get(&id).cloned())
    }

    async fn list_ingredients(
        &self,
        search: &IngredientSearch,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        let state = self.lock();
        let mut found: Vec<Ingredient> = state
            .ingredients
            .values()
            .filter(|ingredient| search.matches(&ingredient.name))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (a.name.as_str(), a.measurement_unit.as_str())
                .cmp(&(b.name.as_str(), b.measurement_unit.as_str()))
        });
        Ok(found)
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError> {
        Ok(self.lock().ingredients.get(&id).cloned())
    }

    async fn known_references(
        &self,
        tag_ids: &[TagId],
        ingredient_ids: &[IngredientId],
    ) -> Result<KnownReferences, CatalogueRepositoryError> {
        let state = self.lock();
        Ok(KnownReferences::new(
            tag_ids
                .iter()
                .copied()
                .filter(|id| state.tags.contains_key(id)),
            ingredient_ids
                .iter()
                .copied()
                .filter(|id| state.ingredients.contains_key(id)),
        ))
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn create(
        &self,
        author: &UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let mut state = self.lock();
        if !state.users.contains_key(author) {
            return Err(RecipeRepositoryError::missing_reference(format!(
                "author {author} does not exist"
            )));
        }
        if let Some(message) = state.missing_reference(draft) {
            return Err(RecipeRepositoryError::missing_reference(message));
        }
        if state.name_taken(author, &draft.name, None) {
            return Err(RecipeRepositoryError::duplicate_name(draft.name.clone()));
        }
        let id = state.next_recipe_id();
        let row = StoredRecipe::new(author.clone(), draft, Utc::now());
        state.recipes.insert(id, row);
        Ok(id)
    }

    async fn replace(
        &self,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<(), RecipeRepositoryError> {
        let mut state = self.lock();
        let Some(author) = state.recipes.get(&id).map(|row| row.author.clone()) else {
            return Err(RecipeRepositoryError::not_found(id.get()));
        };
        if let Some(message) = state.missing_reference(draft) {
            return Err(RecipeRepositoryError::missing_reference(message));
        }
        if state.name_taken(&author, &draft.name, Some(id)) {
            return Err(RecipeRepositoryError::duplicate_name(draft.name.clone()));
        }
        if let Some(row) = state.recipes.get_mut(&id) {
            row.apply(draft);
        }
        Ok(())
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        Ok(self.lock().delete_recipe(id))
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let state = self.lock();
        Ok(state.recipes.get(&id).map(|row| state.hydrate(id, row)))
    }

    async fn find_many(&self, ids: &[RecipeId]) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let state = self.lock();
        Ok(state
            .ordered_recipes()
            .into_iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(id, row)| state.hydrate(id, row))
            .collect())
    }

    async fn list(
        &self,
        query: &RecipeListQuery,
        page: PageRequest,
    ) -> Result<PageSlice<Recipe>, RecipeRepositoryError> {
        let state = self.lock();
        let matching: Vec<(RecipeId, &StoredRecipe)> = state
            .ordered_recipes()
            .into_iter()
            .filter(|(id, row)| state.matches(query, *id, row))
            .collect();
        let total = count(matching.len());
        let items = page_of(matching.into_iter(), page)
            .into_iter()
            .map(|(id, row)| state.hydrate(id, row))
            .collect();
        Ok(PageSlice::new(total, items))
    }

    async fn summaries_by_author(
        &self,
        author: &UserId,
        limit: Option<u64>,
    ) -> Result<PageSlice<RecipeSummary>, RecipeRepositoryError> {
        let state = self.lock();
        let authored: Vec<RecipeSummary> = state
            .ordered_recipes()
            .into_iter()
            .filter(|(_, row)| &row.author == author)
            .map(|(id, row)| state.hydrate(id, row).summary())
            .collect();
        let total = count(authored.len());
        let items = match limit {
            Some(limit) => authored.into_iter().take(bound(limit)).collect(),
            None => authored,
        };
        Ok(PageSlice::new(total, items))
    }
}

#[async_trait]
impl RecipeRelationRepository for MemoryStore {
    async fn insert(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<(), RecipeRelationRepositoryError> {
        let mut state = self.lock();
        if !state.recipes.contains_key(&recipe) {
            return Err(RecipeRelationRepositoryError::missing_recipe());
        }
        if !state.users.contains_key(user) {
            return Err(RecipeRelationRepositoryError::missing_user());
        }
        if !state.relations.insert((user.clone(), recipe, kind)) {
            return Err(RecipeRelationRepositoryError::already_exists());
        }
        Ok(())
    }

    async fn delete(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<bool, RecipeRelationRepositoryError> {
        Ok(self.lock().relations.remove(&(user.clone(), recipe, kind)))
    }

    async fn recipe_ids(
        &self,
        kind: RelationKind,
        user: &UserId,
    ) -> Result<Vec<RecipeId>, RecipeRelationRepositoryError> {
        let state = self.lock();
        Ok(state
            .relations
            .iter()
            .filter(|(owner, _, relation)| owner == user && *relation == kind)
            .map(|(_, recipe, _)| *recipe)
            .collect())
    }

    async fn relations_for(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<(RecipeId, RelationKind)>, RecipeRelationRepositoryError> {
        let state = self.lock();
        Ok(state
            .relations
            .iter()
            .filter(|(owner, recipe, _)| owner == user && recipes.contains(recipe))
            .map(|(_, recipe, kind)| (*recipe, *kind))
            .collect())
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn insert(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut state = self.lock();
        if follower == author {
            return Err(SubscriptionRepositoryError::self_subscription());
        }
        if !state.users.contains_key(author) {
            return Err(SubscriptionRepositoryError::missing_author());
        }
        if !state.users.contains_key(follower) {
            return Err(SubscriptionRepositoryError::missing_follower());
        }
        let pair = (follower.clone(), author.clone());
        if state.subscriptions.contains(&pair) {
            return Err(SubscriptionRepositoryError::already_subscribed());
        }
        state.subscriptions.push(pair);
        Ok(())
    }

    async fn delete(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut state = self.lock();
        let before = state.subscriptions.len();
        state
            .subscriptions
            .retain(|(who, whom)| !(who == follower && whom == author));
        Ok(state.subscriptions.len() < before)
    }

    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, SubscriptionRepositoryError> {
        let state = self.lock();
        Ok(state
            .subscriptions
            .iter()
            .filter(|(who, whom)| who == follower && authors.contains(whom))
            .map(|(_, whom)| whom.clone())
            .collect())
    }

    async fn list_authors(
        &self,
        follower: &UserId,
        page: PageRequest,
    ) -> Result<PageSlice<UserId>, SubscriptionRepositoryError> {
        let state = self.lock();
        let followed: Vec<UserId> = state
            .subscriptions
            .iter()
            .filter(|(who, _)| who == follower)
            .map(|(_, whom)| whom.clone())
            .collect();
        let total = count(followed.len());
        Ok(PageSlice::new(total, page_of(followed.into_iter(), page)))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.get(id).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }

    async fn list(&self, page: PageRequest) -> Result<PageSlice<User>, UserPersistenceError> {
        let state = self.lock();
        let mut users: Vec<&User> = state.users.values().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        let total = count(users.len());
        let items = page_of(users.into_iter().cloned(), page);
        Ok(PageSlice::new(total, items))
    }
}
