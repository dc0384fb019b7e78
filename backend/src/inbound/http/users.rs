//! User directory and subscription handlers.
//!
//! ```text
//! GET    /api/users?page=&limit=
//! GET    /api/users/me
//! GET    /api/users/subscriptions?page=&limit=&recipes_limit=
//! GET    /api/users/{id}
//! GET    /api/users/{id}/subscribe?recipes_limit=
//! POST   /api/users/{id}/subscribe?recipes_limit=
//! DELETE /api/users/{id}/subscribe
//! ```
//!
//! `/users/me` and `/users/subscriptions` must be registered before
//! `/users/{id}`.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use pagination::Page;

use super::dto::{AuthorResponse, SubscriptionResponse};
use super::query::{QueryParams, page_envelope};
use super::schemas::{ErrorSchema, SubscriptionPageSchema, UserPageSchema};
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::FieldName;
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;

const RECIPES_LIMIT: FieldName = FieldName::new("recipes_limit");

/// A path segment that is not a UUID cannot name a user.
fn path_user(raw: &str) -> ApiResult<UserId> {
    UserId::new(raw).map_err(|_| Error::not_found(format!("user {raw} not found")))
}

/// List users, ordered by username.
#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of users", body = UserPageSchema),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 404, description = "Page out of range", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([], ("SessionCookie" = []))
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<Page<AuthorResponse>>> {
    let viewer = session.viewer()?;
    let page = QueryParams::from_request(&req).page_request(state.page_limits)?;
    let slice = state.users.list_users(viewer, page).await?;
    Ok(web::Json(page_envelope(
        &req,
        page,
        slice,
        AuthorResponse::from,
    )?))
}

/// The signed-in user's own profile.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = AuthorResponse),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AuthorResponse>> {
    let me = session.require_viewer()?;
    let profile = state.users.get_user(Some(me.clone()), &me).await?;
    Ok(web::Json(profile.into()))
}

/// Authors the signed-in user follows, with recipe previews.
#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("recipes_limit" = Option<u64>, Query, description = "Recipes shown per author")
    ),
    responses(
        (status = 200, description = "Page of subscriptions", body = SubscriptionPageSchema),
        (status = 400, description = "Invalid parameter", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listSubscriptions",
    security(("SessionCookie" = []))
)]
#[get("/users/subscriptions")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<Page<SubscriptionResponse>>> {
    let follower = session.require_viewer()?;
    let params = QueryParams::from_request(&req);
    let recipes_limit = params.count(RECIPES_LIMIT, "recipes_limit")?;
    let page = params.page_request(state.page_limits)?;
    let slice = state
        .subscriptions_query
        .list_subscriptions(&follower, page, recipes_limit)
        .await?;
    Ok(web::Json(page_envelope(
        &req,
        page,
        slice,
        SubscriptionResponse::from,
    )?))
}

/// Fetch one user's public profile.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = AuthorResponse),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([], ("SessionCookie" = []))
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AuthorResponse>> {
    let viewer = session.viewer()?;
    let id = path_user(&path)?;
    let profile = state.users.get_user(viewer, &id).await?;
    Ok(web::Json(profile.into()))
}

async fn follow(
    state: &HttpState,
    session: &SessionContext,
    req: &HttpRequest,
    raw_author: &str,
) -> ApiResult<HttpResponse> {
    let follower = session.require_viewer()?;
    let author = path_user(raw_author)?;
    let recipes_limit = QueryParams::from_request(req).count(RECIPES_LIMIT, "recipes_limit")?;
    let subscription = state
        .subscriptions
        .subscribe(&follower, &author, recipes_limit)
        .await?;
    Ok(HttpResponse::Created().json(SubscriptionResponse::from(subscription)))
}

/// Follow an author.
#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    params(
        ("id" = String, Path, description = "Author id"),
        ("recipes_limit" = Option<u64>, Query, description = "Recipes shown in the response")
    ),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionResponse),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Unknown author", body = ErrorSchema),
        (status = 409, description = "Already subscribed, or self", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "subscribe",
    security(("SessionCookie" = []))
)]
#[post("/users/{id}/subscribe")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    follow(&state, &session, &req, &path).await
}

/// Follow an author; same as `POST` for clients that only issue `GET`.
#[utoipa::path(
    get,
    path = "/api/users/{id}/subscribe",
    params(
        ("id" = String, Path, description = "Author id"),
        ("recipes_limit" = Option<u64>, Query, description = "Recipes shown in the response")
    ),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionResponse),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Unknown author", body = ErrorSchema),
        (status = 409, description = "Already subscribed, or self", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "subscribeViaGet",
    security(("SessionCookie" = []))
)]
#[get("/users/{id}/subscribe")]
pub async fn subscribe_via_get(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    follow(&state, &session, &req, &path).await
}

/// Stop following an author.
#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    params(("id" = String, Path, description = "Author id")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Not subscribed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "unsubscribe",
    security(("SessionCookie" = []))
)]
#[delete("/users/{id}/subscribe")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let follower = session.require_viewer()?;
    let author = path_user(&path)?;
    state.subscriptions.unsubscribe(&follower, &author).await?;
    Ok(HttpResponse::NoContent().finish())
}
