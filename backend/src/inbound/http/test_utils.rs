//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test, web};
use pagination::PageLimits;
use serde_json::{Value, json};

use super::session::SessionContext;
use super::state::{HttpState, HttpStatePorts, Repositories};
use crate::domain::fixtures::{PNG_DATA_URI, user};
use crate::domain::{Error, Ingredient, Tag, User, UserId};
use crate::outbound::memory::MemoryStore;

const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Call `uri` and return the session cookie it sets.
pub async fn session_cookie<S>(app: &S, uri: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await;
    assert!(res.status().is_success(), "{uri} returned {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie")
        .into_owned()
}

/// Sign in as `user_id` through the test-only login route.
pub async fn login<S>(app: &S, user_id: &UserId) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    session_cookie(app, &format!("/test/login/{user_id}")).await
}

/// Send `request` and decode the JSON body; empty bodies decode to `null`.
pub async fn call_json<S>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, request.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

/// In-memory store seeded with two users, two tags and three ingredients.
pub struct TestWorld {
    pub store: Arc<MemoryStore>,
    pub chef: User,
    pub guest: User,
    pub dinner: Tag,
    pub breakfast: Tag,
    pub flour: Ingredient,
    pub sugar: Ingredient,
    pub eggs: Ingredient,
}

impl TestWorld {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let chef = user("chef");
        let guest = user("guest");
        store.upsert_user(chef.clone());
        store.upsert_user(guest.clone());
        let dinner = store.add_tag("Dinner", "#2D6CE2", "dinner");
        let breakfast = store.add_tag("Breakfast", "#E26C2D", "breakfast");
        let flour = store.add_ingredient("Flour", "g");
        let sugar = store.add_ingredient("Sugar", "g");
        let eggs = store.add_ingredient("Eggs", "pcs");
        Self {
            store,
            chef,
            guest,
            dinner,
            breakfast,
            flour,
            sugar,
            eggs,
        }
    }

    /// Handler state wired to real services over the store.
    pub fn state(&self) -> HttpState {
        let ports = HttpStatePorts::from_repositories(Repositories {
            catalogue: self.store.clone(),
            recipes: self.store.clone(),
            relations: self.store.clone(),
            subscriptions: self.store.clone(),
            users: self.store.clone(),
        });
        HttpState::new(ports, PageLimits::default())
    }

    /// A valid recipe body tagged `dinner` using flour and sugar.
    pub fn recipe_body(&self, name: &str) -> Value {
        json!({
            "ingredients": [
                {"id": self.flour.id.get(), "amount": 200},
                {"id": self.sugar.id.get(), "amount": 50}
            ],
            "tags": [self.dinner.id.get()],
            "image": PNG_DATA_URI,
            "name": name,
            "text": "Mix, then bake for twenty minutes.",
            "cooking_time": 20
        })
    }
}

async fn test_login(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// The API as served, plus a `/test/login/{id}` route that signs in.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(super::error::json_config())
        .wrap(test_session_middleware())
        .route("/test/login/{id}", web::get().to(test_login))
        .service(web::scope("/api").configure(super::configure))
}
