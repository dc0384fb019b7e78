//! PostgreSQL-backed recipe repository.
//!
//! A recipe spans three tables (`recipes`, `recipe_tags`,
//! `recipe_ingredients`). Writes touch all three inside one transaction;
//! reads load the recipe rows first and then their children with two
//! batched queries.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use pagination::{PageRequest, PageSlice};

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Recipe, RecipeDraft, RecipeId, RecipeListQuery, RecipeSummary, Tag, UserId,
};

use super::diesel_helpers::{
    DbFailure, classify, from_sql_count, map_pool_error_message, to_sql_count,
};
use super::models::{
    IngredientRow, NewRecipeIngredientRow, NewRecipeRow, NewRecipeTagRow, RecipeRow,
    RecipeUpdate, TagRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, recipe_ingredients, recipe_relations, recipe_tags, recipes, tags};

/// Diesel-backed implementation of the recipe port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a write transaction.
#[derive(Debug)]
enum WriteError {
    Diesel(diesel::result::Error),
    RecipeMissing,
}

impl From<diesel::result::Error> for WriteError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    RecipeRepositoryError::connection(map_pool_error_message(error))
}

fn map_read_error(error: diesel::result::Error) -> RecipeRepositoryError {
    match classify(error, "recipe read") {
        DbFailure::Connection { message } => RecipeRepositoryError::connection(message),
        DbFailure::Query { message } => RecipeRepositoryError::query(message),
        other => RecipeRepositoryError::query(format!("unexpected failure: {other:?}")),
    }
}

fn map_write_error(error: WriteError, id: Option<RecipeId>, name: &str) -> RecipeRepositoryError {
    let failure = match error {
        WriteError::RecipeMissing => DbFailure::NotFound,
        WriteError::Diesel(diesel_error) => classify(diesel_error, "recipe write"),
    };
    match failure {
        DbFailure::UniqueViolation { .. } => RecipeRepositoryError::duplicate_name(name),
        DbFailure::ForeignKeyViolation { message, .. } => {
            RecipeRepositoryError::missing_reference(message)
        }
        DbFailure::NotFound => {
            RecipeRepositoryError::not_found(id.map_or(0, RecipeId::get))
        }
        DbFailure::Connection { message } => RecipeRepositoryError::connection(message),
        DbFailure::CheckViolation { constraint } => RecipeRepositoryError::query(format!(
            "check constraint {} rejected the recipe",
            constraint.as_deref().unwrap_or("unknown")
        )),
        DbFailure::Query { message } => RecipeRepositoryError::query(message),
    }
}

/// Base query with every list restriction applied.
fn filtered(query: &RecipeListQuery) -> recipes::BoxedQuery<'static, Pg> {
    let mut boxed = recipes::table.into_boxed();
    if let Some(author) = &query.author {
        boxed = boxed.filter(recipes::author_id.eq(*author.as_uuid()));
    }
    if !query.tag_slugs.is_empty() {
        let tagged = recipe_tags::table
            .inner_join(tags::table)
            .filter(tags::slug.eq_any(query.tag_slugs.clone()))
            .select(recipe_tags::recipe_id);
        boxed = boxed.filter(recipes::id.eq_any(tagged));
    }
    for rule in &query.relations {
        let marked = recipe_relations::table
            .filter(recipe_relations::user_id.eq(*rule.user.as_uuid()))
            .filter(recipe_relations::kind.eq(rule.kind.as_str()))
            .select(recipe_relations::recipe_id);
        boxed = boxed.filter(recipes::id.eq_any(marked));
    }
    boxed
}

/// Attach tags and ingredient lines to `rows`, keeping row order.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<RecipeRow>,
) -> Result<Vec<Recipe>, RecipeRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

    let tag_rows: Vec<(i64, TagRow)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(&ids))
        .select((recipe_tags::recipe_id, TagRow::as_select()))
        .order_by((recipe_tags::recipe_id, tags::name))
        .load(conn)
        .await
        .map_err(map_read_error)?;
    let line_rows: Vec<(i64, i16, IngredientRow)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&ids))
        .select((
            recipe_ingredients::recipe_id,
            recipe_ingredients::amount,
            IngredientRow::as_select(),
        ))
        .order_by((recipe_ingredients::recipe_id, ingredients::name))
        .load(conn)
        .await
        .map_err(map_read_error)?;

    let mut tags_by_recipe: HashMap<i64, Vec<Tag>> = HashMap::new();
    for (recipe_id, row) in tag_rows {
        tags_by_recipe.entry(recipe_id).or_default().push(row.into());
    }
    let mut lines_by_recipe: HashMap<i64, Vec<(IngredientRow, i16)>> = HashMap::new();
    for (recipe_id, amount, row) in line_rows {
        lines_by_recipe
            .entry(recipe_id)
            .or_default()
            .push((row, amount));
    }

    rows.into_iter()
        .map(|row| {
            let tag_list = tags_by_recipe.remove(&row.id).unwrap_or_default();
            let lines = lines_by_recipe.remove(&row.id).unwrap_or_default();
            row.into_recipe(tag_list, lines)
                .map_err(RecipeRepositoryError::query)
        })
        .collect()
}

async fn insert_children(
    conn: &mut AsyncPgConnection,
    recipe_id: i64,
    draft: &RecipeDraft,
) -> Result<(), diesel::result::Error> {
    let tag_rows: Vec<NewRecipeTagRow> = draft
        .tag_ids
        .iter()
        .map(|tag_id| NewRecipeTagRow {
            recipe_id,
            tag_id: tag_id.get(),
        })
        .collect();
    let line_rows: Vec<NewRecipeIngredientRow> = draft
        .lines
        .iter()
        .map(|line| NewRecipeIngredientRow {
            recipe_id,
            ingredient_id: line.ingredient_id.get(),
            amount: line.amount.get(),
        })
        .collect();

    diesel::insert_into(recipe_tags::table)
        .values(&tag_rows)
        .execute(conn)
        .await?;
    diesel::insert_into(recipe_ingredients::table)
        .values(&line_rows)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(
        &self,
        author: &UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewRecipeRow {
            author_id: *author.as_uuid(),
            name: &draft.name,
            image: draft.image.as_str(),
            text: &draft.text,
            cooking_time: draft.cooking_time.get(),
        };

        let recipe_id = conn
            .transaction(|conn| {
                async move {
                    let recipe_id: i64 = diesel::insert_into(recipes::table)
                        .values(&new_row)
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;
                    insert_children(conn, recipe_id, draft).await?;
                    Ok::<i64, WriteError>(recipe_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_write_error(err, None, &draft.name))?;

        Ok(RecipeId::new(recipe_id))
    }

    async fn replace(
        &self,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<(), RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = RecipeUpdate {
            name: &draft.name,
            image: draft.image.as_str(),
            text: &draft.text,
            cooking_time: draft.cooking_time.get(),
        };
        let recipe_id = id.get();

        conn.transaction(|conn| {
            async move {
                let updated = diesel::update(recipes::table.find(recipe_id))
                    .set(&update)
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Err(WriteError::RecipeMissing);
                }
                diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
                    .execute(conn)
                    .await?;
                diesel::delete(
                    recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)),
                )
                .execute(conn)
                .await?;
                insert_children(conn, recipe_id, draft).await?;
                Ok::<(), WriteError>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_write_error(err, Some(id), &draft.name))
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(recipes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(WriteError::Diesel(err), Some(id), ""))?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RecipeRow> = recipes::table
            .find(id.get())
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(hydrate(&mut conn, vec![row]).await?.pop())
    }

    async fn find_many(&self, ids: &[RecipeId]) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::id.eq_any(&raw))
            .select(RecipeRow::as_select())
            .order_by((recipes::created_at, recipes::id))
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;
        hydrate(&mut conn, rows).await
    }

    async fn list(
        &self,
        query: &RecipeListQuery,
        page: PageRequest,
    ) -> Result<PageSlice<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(query)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_read_error)?;
        let rows: Vec<RecipeRow> = filtered(query)
            .select(RecipeRow::as_select())
            .order_by((recipes::created_at.asc(), recipes::id.asc()))
            .offset(to_sql_count(page.offset()))
            .limit(to_sql_count(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;
        let recipes = hydrate(&mut conn, rows).await?;
        Ok(PageSlice::new(from_sql_count(total), recipes))
    }

    async fn summaries_by_author(
        &self,
        author: &UserId,
        limit: Option<u64>,
    ) -> Result<PageSlice<RecipeSummary>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let author_id = *author.as_uuid();
        let total: i64 = recipes::table
            .filter(recipes::author_id.eq(author_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_read_error)?;

        let mut query = recipes::table
            .filter(recipes::author_id.eq(author_id))
            .select(RecipeRow::as_select())
            .order_by((recipes::created_at.asc(), recipes::id.asc()))
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(to_sql_count(limit));
        }
        let rows: Vec<RecipeRow> = query.load(&mut conn).await.map_err(map_read_error)?;
        let summaries = rows
            .into_iter()
            .map(RecipeRow::into_summary)
            .collect::<Result<Vec<_>, String>>()
            .map_err(RecipeRepositoryError::query)?;
        Ok(PageSlice::new(from_sql_count(total), summaries))
    }
}
