//! Recipe reads rendered for a viewer.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, PageSlice};

use crate::domain::ports::{
    RecipeQuery, RecipeRelationRepository, RecipeRepository, SubscriptionRepository,
    UserRepository,
};
use crate::domain::{
    AuthorProfile, Error, Recipe, RecipeDetail, RecipeFilter, RecipeId, User, UserId, ViewerFlags,
};

/// Recipe query service implementing [`RecipeQuery`].
#[derive(Clone)]
pub struct RecipeQueryService<R, L, S, U> {
    recipes: Arc<R>,
    relations: Arc<L>,
    subscriptions: Arc<S>,
    users: Arc<U>,
}

impl<R, L, S, U> RecipeQueryService<R, L, S, U> {
    pub fn new(recipes: Arc<R>, relations: Arc<L>, subscriptions: Arc<S>, users: Arc<U>) -> Self {
        Self {
            recipes,
            relations,
            subscriptions,
            users,
        }
    }
}

/// Authors among `authors` that `viewer` follows. Empty for anonymous viewers.
pub(crate) async fn followed_authors<S>(
    subscriptions: &S,
    viewer: Option<&UserId>,
    authors: &[UserId],
) -> Result<HashSet<UserId>, Error>
where
    S: SubscriptionRepository + ?Sized,
{
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };
    if authors.is_empty() {
        return Ok(HashSet::new());
    }
    let followed = subscriptions.followed_among(viewer, authors).await?;
    Ok(followed.into_iter().collect())
}

/// Pair each user with the viewer's subscription state.
pub(crate) async fn author_profiles<S>(
    subscriptions: &S,
    viewer: Option<&UserId>,
    users: Vec<User>,
) -> Result<Vec<AuthorProfile>, Error>
where
    S: SubscriptionRepository + ?Sized,
{
    let ids: Vec<UserId> = users.iter().map(|user| user.id.clone()).collect();
    let followed = followed_authors(subscriptions, viewer, &ids).await?;
    Ok(users
        .into_iter()
        .map(|user| AuthorProfile {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

impl<R, L, S, U> RecipeQueryService<R, L, S, U>
where
    R: RecipeRepository,
    L: RecipeRelationRepository,
    S: SubscriptionRepository,
    U: UserRepository,
{
    async fn viewer_flags(
        &self,
        viewer: Option<&UserId>,
        recipes: &[Recipe],
    ) -> Result<HashMap<RecipeId, ViewerFlags>, Error> {
        let mut flags: HashMap<RecipeId, ViewerFlags> = HashMap::new();
        let Some(viewer) = viewer else {
            return Ok(flags);
        };
        if recipes.is_empty() {
            return Ok(flags);
        }
        let ids: Vec<RecipeId> = recipes.iter().map(|recipe| recipe.id).collect();
        for (recipe_id, kind) in self.relations.relations_for(viewer, &ids).await? {
            flags.entry(recipe_id).or_default().mark(kind);
        }
        Ok(flags)
    }

    async fn authors(
        &self,
        viewer: Option<&UserId>,
        recipes: &[Recipe],
    ) -> Result<HashMap<UserId, AuthorProfile>, Error> {
        let mut ids: Vec<UserId> = recipes.iter().map(|recipe| recipe.author.clone()).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = self.users.find_many(&ids).await?;
        let profiles = author_profiles(self.subscriptions.as_ref(), viewer, users).await?;
        Ok(profiles
            .into_iter()
            .map(|profile| (profile.user.id.clone(), profile))
            .collect())
    }

    async fn render(
        &self,
        viewer: Option<&UserId>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeDetail>, Error> {
        let authors = self.authors(viewer, &recipes).await?;
        let flags = self.viewer_flags(viewer, &recipes).await?;
        recipes
            .into_iter()
            .map(|recipe| {
                let author = authors.get(&recipe.author).cloned().ok_or_else(|| {
                    Error::internal(format!("author of recipe {} is missing", recipe.id))
                })?;
                let recipe_flags = flags.get(&recipe.id).copied().unwrap_or_default();
                Ok(RecipeDetail {
                    recipe,
                    author,
                    flags: recipe_flags,
                })
            })
            .collect()
    }
}

#[async_trait]
impl<R, L, S, U> RecipeQuery for RecipeQueryService<R, L, S, U>
where
    R: RecipeRepository,
    L: RecipeRelationRepository,
    S: SubscriptionRepository,
    U: UserRepository,
{
    async fn list_recipes(
        &self,
        viewer: Option<UserId>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<PageSlice<RecipeDetail>, Error> {
        let query = filter.resolve(viewer.as_ref());
        let slice = self.recipes.list(&query, page).await?;
        let details = self.render(viewer.as_ref(), slice.items).await?;
        Ok(PageSlice::new(slice.total, details))
    }

    async fn get_recipe(
        &self,
        viewer: Option<UserId>,
        id: RecipeId,
    ) -> Result<RecipeDetail, Error> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("recipe {id} not found")))?;
        let mut rendered = self.render(viewer.as_ref(), vec![recipe]).await?;
        rendered
            .pop()
            .ok_or_else(|| Error::internal(format!("recipe {id} was not rendered")))
    }
}

#[cfg(test)]
#[path = "recipe_query_service_tests.rs"]
mod tests;
