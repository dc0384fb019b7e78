//! PostgreSQL-backed favourites and shopping cart adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipeRelationRepository, RecipeRelationRepositoryError};
use crate::domain::{RecipeId, RelationKind, UserId};

use super::diesel_helpers::{DbFailure, classify, map_pool_error_message};
use super::models::NewRecipeRelationRow;
use super::pool::{DbPool, PoolError};
use super::schema::recipe_relations;

/// Diesel-backed implementation of the recipe relation port.
#[derive(Clone)]
pub struct DieselRecipeRelationRepository {
    pool: DbPool,
}

impl DieselRecipeRelationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRelationRepositoryError {
    RecipeRelationRepositoryError::connection(map_pool_error_message(error))
}

/// Foreign key from `recipe_relations.user_id` to `users`.
const USER_FOREIGN_KEY: &str = "recipe_relations_user_fk";

fn map_diesel_error(error: diesel::result::Error) -> RecipeRelationRepositoryError {
    match classify(error, "recipe relation") {
        DbFailure::UniqueViolation { .. } => RecipeRelationRepositoryError::already_exists(),
        DbFailure::ForeignKeyViolation { constraint, .. }
            if constraint.as_deref() == Some(USER_FOREIGN_KEY) =>
        {
            RecipeRelationRepositoryError::missing_user()
        }
        DbFailure::ForeignKeyViolation { .. } => RecipeRelationRepositoryError::missing_recipe(),
        DbFailure::Connection { message } => RecipeRelationRepositoryError::connection(message),
        DbFailure::Query { message } => RecipeRelationRepositoryError::query(message),
        other => RecipeRelationRepositoryError::query(format!("unexpected failure: {other:?}")),
    }
}

fn parse_kind(label: &str) -> Result<RelationKind, RecipeRelationRepositoryError> {
    RelationKind::parse(label).ok_or_else(|| {
        RecipeRelationRepositoryError::query(format!("unknown relation kind '{label}'"))
    })
}

#[async_trait]
impl RecipeRelationRepository for DieselRecipeRelationRepository {
    async fn insert(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<(), RecipeRelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewRecipeRelationRow {
            user_id: *user.as_uuid(),
            recipe_id: recipe.get(),
            kind: kind.as_str(),
        };
        diesel::insert_into(recipe_relations::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(
        &self,
        kind: RelationKind,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<bool, RecipeRelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            recipe_relations::table
                .filter(recipe_relations::user_id.eq(*user.as_uuid()))
                .filter(recipe_relations::recipe_id.eq(recipe.get()))
                .filter(recipe_relations::kind.eq(kind.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn recipe_ids(
        &self,
        kind: RelationKind,
        user: &UserId,
    ) -> Result<Vec<RecipeId>, RecipeRelationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<i64> = recipe_relations::table
            .filter(recipe_relations::user_id.eq(*user.as_uuid()))
            .filter(recipe_relations::kind.eq(kind.as_str()))
            .order_by((recipe_relations::created_at, recipe_relations::recipe_id))
            .select(recipe_relations::recipe_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids.into_iter().map(RecipeId::new).collect())
    }

    async fn relations_for(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<(RecipeId, RelationKind)>, RecipeRelationRepositoryError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<i64> = recipes.iter().map(|id| id.get()).collect();
        let rows: Vec<(i64, String)> = recipe_relations::table
            .filter(recipe_relations::user_id.eq(*user.as_uuid()))
            .filter(recipe_relations::recipe_id.eq_any(&raw))
            .select((recipe_relations::recipe_id, recipe_relations::kind))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(recipe_id, label)| Ok((RecipeId::new(recipe_id), parse_kind(&label)?)))
            .collect()
    }
}
