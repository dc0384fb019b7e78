//! Catalogue reads backed by the catalogue repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CatalogueQuery, CatalogueRepository};
use crate::domain::{Error, Ingredient, IngredientId, IngredientSearch, Tag, TagId};

/// Implements [`CatalogueQuery`] over a [`CatalogueRepository`].
#[derive(Clone)]
pub struct CatalogueService<C> {
    catalogue: Arc<C>,
}

impl<C> CatalogueService<C> {
    pub fn new(catalogue: Arc<C>) -> Self {
        Self { catalogue }
    }
}

#[async_trait]
impl<C> CatalogueQuery for CatalogueService<C>
where
    C: CatalogueRepository,
{
    async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        Ok(self.catalogue.list_tags().await?)
    }

    async fn get_tag(&self, id: TagId) -> Result<Tag, Error> {
        self.catalogue
            .find_tag(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("tag {id} not found")))
    }

    async fn list_ingredients(&self, search: IngredientSearch) -> Result<Vec<Ingredient>, Error> {
        Ok(self.catalogue.list_ingredients(&search).await?)
    }

    async fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, Error> {
        self.catalogue
            .find_ingredient(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("ingredient {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{CatalogueRepositoryError, MockCatalogueRepository};
    use rstest::rstest;

    fn service(repo: MockCatalogueRepository) -> CatalogueService<MockCatalogueRepository> {
        CatalogueService::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn missing_tag_is_not_found() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_find_tag().times(1).return_once(|_| Ok(None));

        let error = service(repo)
            .get_tag(TagId::new(9))
            .await
            .expect_err("tag is missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "tag 9 not found");
    }

    #[rstest]
    #[tokio::test]
    async fn ingredient_search_is_forwarded() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_list_ingredients()
            .withf(|search| search.prefix() == Some("sug"))
            .times(1)
            .return_once(|_| {
                Ok(vec![Ingredient {
                    id: IngredientId::new(1),
                    name: "Sugar".to_owned(),
                    measurement_unit: "g".to_owned(),
                }])
            });

        let found = service(repo)
            .list_ingredients(IngredientSearch::new(Some("Sug".to_owned())))
            .await
            .expect("search succeeds");
        assert_eq!(found.len(), 1);
    }

    #[rstest]
    #[case(CatalogueRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(CatalogueRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn repository_failures_are_mapped(
        #[case] failure: CatalogueRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_list_tags().return_once(move || Err(failure));

        let error = service(repo).list_tags().await.expect_err("read fails");
        assert_eq!(error.code(), expected);
    }
}
