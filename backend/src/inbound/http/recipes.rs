//! Recipe list, detail and authoring endpoints.
//!
//! ```text
//! GET    /api/recipes?author=&tags=&is_favorited=&is_in_shopping_cart=&page=&limit=
//! POST   /api/recipes
//! GET    /api/recipes/{id}
//! PATCH  /api/recipes/{id}
//! DELETE /api/recipes/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use pagination::Page;

use super::dto::{RecipeRequest, RecipeResponse, RecipeWriteResponse};
use super::query::{QueryParams, page_envelope};
use super::schemas::{ErrorSchema, RecipePageSchema};
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::{FieldName, parse_user_id};
use crate::domain::{RecipeFilter, RecipeId};
use crate::inbound::http::ApiResult;

const AUTHOR: FieldName = FieldName::new("author");
const IS_FAVORITED: FieldName = FieldName::new("is_favorited");
const IS_IN_SHOPPING_CART: FieldName = FieldName::new("is_in_shopping_cart");

fn recipe_filter(params: &QueryParams) -> ApiResult<RecipeFilter> {
    let author = params
        .first("author")
        .map(|raw| parse_user_id(AUTHOR, raw))
        .transpose()?;
    Ok(RecipeFilter {
        author,
        tags: params.all("tags"),
        is_favorited: params.flag(IS_FAVORITED, "is_favorited")?,
        is_in_shopping_cart: params.flag(IS_IN_SHOPPING_CART, "is_in_shopping_cart")?,
    })
}

/// List recipes, oldest first.
///
/// Several `tags` match any of the slugs. The favourite and cart flags apply
/// to the signed-in viewer and are ignored for anonymous requests.
#[utoipa::path(
    get,
    path = "/api/recipes",
    params(
        ("author" = Option<String>, Query, description = "Author id"),
        ("tags" = Option<Vec<String>>, Query, description = "Tag slugs, repeatable"),
        ("is_favorited" = Option<bool>, Query, description = "Only the viewer's favourites"),
        ("is_in_shopping_cart" = Option<bool>, Query, description = "Only the viewer's cart"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of recipes", body = RecipePageSchema),
        (status = 400, description = "Invalid filter or page", body = ErrorSchema),
        (status = 404, description = "Page out of range", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes",
    security([], ("SessionCookie" = []))
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<Page<RecipeResponse>>> {
    let viewer = session.viewer()?;
    let params = QueryParams::from_request(&req);
    let filter = recipe_filter(&params)?;
    let page = params.page_request(state.page_limits)?;
    let slice = state.recipes.list_recipes(viewer, filter, page).await?;
    Ok(web::Json(page_envelope(
        &req,
        page,
        slice,
        RecipeResponse::from,
    )?))
}

/// Publish a recipe as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeWriteResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 409, description = "Name already used by this author", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe",
    security(("SessionCookie" = []))
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_viewer()?;
    let created = state
        .authoring
        .create_recipe(&author, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(RecipeWriteResponse::from(created)))
}

/// Fetch one recipe with the viewer's flags.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 404, description = "Unknown recipe", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe",
    security([], ("SessionCookie" = []))
)]
#[get("/recipes/{id:\\d+}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let viewer = session.viewer()?;
    let detail = state
        .recipes
        .get_recipe(viewer, RecipeId::new(path.into_inner()))
        .await?;
    Ok(web::Json(detail.into()))
}

/// Replace a recipe's fields, tags and ingredients. Authors only.
#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeWriteResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Unknown recipe", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe",
    security(("SessionCookie" = []))
)]
#[patch("/recipes/{id:\\d+}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeWriteResponse>> {
    let actor = session.require_viewer()?;
    let updated = state
        .authoring
        .update_recipe(
            &actor,
            RecipeId::new(path.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(updated.into()))
}

/// Delete a recipe and everything attached to it. Authors only.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Unknown recipe", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe",
    security(("SessionCookie" = []))
)]
#[delete("/recipes/{id:\\d+}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_viewer()?;
    state
        .authoring
        .delete_recipe(&actor, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
