//! Tag and ingredient read endpoints.
//!
//! ```text
//! GET /api/tags
//! GET /api/tags/{id}
//! GET /api/ingredients?name=sug
//! GET /api/ingredients/{id}
//! ```
//!
//! The catalogue is public and unpaginated.

use actix_web::{HttpRequest, get, web};

use super::dto::{IngredientResponse, TagResponse};
use super::query::QueryParams;
use super::schemas::ErrorSchema;
use super::state::HttpState;
use crate::domain::{IngredientId, IngredientSearch, TagId};
use crate::inbound::http::ApiResult;

/// List every tag, ordered by name.
#[utoipa::path(
    get,
    path = "/api/tags",
    responses(
        (status = 200, description = "Tags", body = [TagResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listTags",
    security([])
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TagResponse>>> {
    let tags = state.catalogue.list_tags().await?;
    Ok(web::Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Fetch one tag.
#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag", body = TagResponse),
        (status = 404, description = "Unknown tag", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getTag",
    security([])
)]
#[get("/tags/{id}")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TagResponse>> {
    let tag = state.catalogue.get_tag(TagId::new(path.into_inner())).await?;
    Ok(web::Json(tag.into()))
}

/// List ingredients, optionally filtered by a case-insensitive name prefix.
#[utoipa::path(
    get,
    path = "/api/ingredients",
    params(("name" = Option<String>, Query, description = "Name prefix")),
    responses(
        (status = 200, description = "Ingredients", body = [IngredientResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listIngredients",
    security([])
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<IngredientResponse>>> {
    let params = QueryParams::from_request(&req);
    let search = IngredientSearch::new(params.first("name").map(str::to_owned));
    let ingredients = state.catalogue.list_ingredients(search).await?;
    Ok(web::Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

/// Fetch one ingredient.
#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 404, description = "Unknown ingredient", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getIngredient",
    security([])
)]
#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let ingredient = state
        .catalogue
        .get_ingredient(IngredientId::new(path.into_inner()))
        .await?;
    Ok(web::Json(ingredient.into()))
}
