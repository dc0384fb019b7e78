//! Favourite and shopping cart endpoints, plus the shopping list export.
//!
//! ```text
//! POST   /api/recipes/{id}/favorite
//! DELETE /api/recipes/{id}/favorite
//! POST   /api/recipes/{id}/shopping_cart
//! DELETE /api/recipes/{id}/shopping_cart
//! GET    /api/recipes/download_shopping_cart
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, delete, get, post, web};

use super::dto::RecipeSummaryResponse;
use super::schemas::ErrorSchema;
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{Error, RecipeId, RelationKind, ShoppingList};
use crate::inbound::http::ApiResult;

const SHOPPING_LIST_FILENAME: &str = "shopping_list.csv";

async fn add_relation(
    state: &HttpState,
    session: &SessionContext,
    kind: RelationKind,
    recipe: i64,
) -> ApiResult<HttpResponse> {
    let user = session.require_viewer()?;
    let summary = state
        .relations
        .add(kind, &user, RecipeId::new(recipe))
        .await?;
    Ok(HttpResponse::Created().json(RecipeSummaryResponse::from(summary)))
}

async fn remove_relation(
    state: &HttpState,
    session: &SessionContext,
    kind: RelationKind,
    recipe: i64,
) -> ApiResult<HttpResponse> {
    let user = session.require_viewer()?;
    state
        .relations
        .remove(kind, &user, RecipeId::new(recipe))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a recipe to the viewer's favourites.
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 201, description = "Favourited", body = RecipeSummaryResponse),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Unknown recipe", body = ErrorSchema),
        (status = 409, description = "Already a favourite", body = ErrorSchema)
    ),
    tags = ["relations"],
    operation_id = "addFavorite",
    security(("SessionCookie" = []))
)]
#[post("/recipes/{id:\\d+}/favorite")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    add_relation(&state, &session, RelationKind::Favorite, path.into_inner()).await
}

/// Remove a recipe from the viewer's favourites.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Removed"),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Not a favourite", body = ErrorSchema)
    ),
    tags = ["relations"],
    operation_id = "removeFavorite",
    security(("SessionCookie" = []))
)]
#[delete("/recipes/{id:\\d+}/favorite")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    remove_relation(&state, &session, RelationKind::Favorite, path.into_inner()).await
}

/// Put a recipe in the viewer's shopping cart.
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 201, description = "Added to cart", body = RecipeSummaryResponse),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Unknown recipe", body = ErrorSchema),
        (status = 409, description = "Already in the cart", body = ErrorSchema)
    ),
    tags = ["relations"],
    operation_id = "addToShoppingCart",
    security(("SessionCookie" = []))
)]
#[post("/recipes/{id:\\d+}/shopping_cart")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    add_relation(&state, &session, RelationKind::ShoppingCart, path.into_inner()).await
}

/// Take a recipe out of the viewer's shopping cart.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Removed"),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Not in the cart", body = ErrorSchema)
    ),
    tags = ["relations"],
    operation_id = "removeFromShoppingCart",
    security(("SessionCookie" = []))
)]
#[delete("/recipes/{id:\\d+}/shopping_cart")]
pub async fn remove_from_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    remove_relation(
        &state,
        &session,
        RelationKind::ShoppingCart,
        path.into_inner(),
    )
    .await
}

/// Render the list as headerless `name,total,unit` rows.
fn shopping_list_csv(list: &ShoppingList) -> Result<Vec<u8>, Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for item in list.items() {
        writer
            .write_record([
                item.name.as_str(),
                item.total.to_string().as_str(),
                item.measurement_unit.as_str(),
            ])
            .map_err(|err| Error::internal(format!("failed to write shopping list: {err}")))?;
    }
    writer
        .into_inner()
        .map_err(|err| Error::internal(format!("failed to flush shopping list: {err}")))
}

/// Download the viewer's aggregated shopping list as CSV.
///
/// Lines for the same ingredient name and unit are summed across every recipe
/// in the cart. An empty cart yields an empty file.
#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["relations"],
    operation_id = "downloadShoppingCart",
    security(("SessionCookie" = []))
)]
#[get("/recipes/download_shopping_cart")]
pub async fn download_shopping_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = session.require_viewer()?;
    let list = state.shopping_list.shopping_list(&user).await?;
    let body = shopping_list_csv(&list)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(
                SHOPPING_LIST_FILENAME.to_owned(),
            )],
        })
        .body(body))
}

#[cfg(test)]
#[path = "relations_tests.rs"]
mod tests;
