//! PostgreSQL-backed catalogue read adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{Ingredient, IngredientId, IngredientSearch, KnownReferences, Tag, TagId};

use super::diesel_helpers::{DbFailure, classify, map_pool_error_message};
use super::models::{IngredientRow, TagRow};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, tags};

diesel::define_sql_function! {
    /// SQL `LOWER()`.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Diesel-backed implementation of the catalogue read port.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogueRepositoryError {
    CatalogueRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    match classify(error, "catalogue read") {
        DbFailure::Connection { message } => CatalogueRepositoryError::connection(message),
        DbFailure::Query { message } => CatalogueRepositoryError::query(message),
        other => CatalogueRepositoryError::query(format!("unexpected failure: {other:?}")),
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TagRow> = tags::table
            .select(TagRow::as_select())
            .order_by((tags::name, tags::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TagRow> = tags::table
            .find(id.get())
            .select(TagRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Tag::from))
    }

    async fn list_ingredients(
        &self,
        search: &IngredientSearch,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = ingredients::table
            .select(IngredientRow::as_select())
            .order_by((ingredients::name, ingredients::measurement_unit))
            .into_boxed();
        if let Some(prefix) = search.prefix() {
            query = query.filter(lower(ingredients::name).like(like_prefix(prefix)));
        }
        let rows: Vec<IngredientRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<IngredientRow> = ingredients::table
            .find(id.get())
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Ingredient::from))
    }

    async fn known_references(
        &self,
        tag_ids: &[TagId],
        ingredient_ids: &[IngredientId],
    ) -> Result<KnownReferences, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_tags: Vec<i64> = tag_ids.iter().map(|id| id.get()).collect();
        let raw_ingredients: Vec<i64> = ingredient_ids.iter().map(|id| id.get()).collect();

        let found_tags: Vec<i64> = tags::table
            .filter(tags::id.eq_any(&raw_tags))
            .select(tags::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let found_ingredients: Vec<i64> = ingredients::table
            .filter(ingredients::id.eq_any(&raw_ingredients))
            .select(ingredients::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(KnownReferences::new(
            found_tags.into_iter().map(TagId::new),
            found_ingredients.into_iter().map(IngredientId::new),
        ))
    }
}
