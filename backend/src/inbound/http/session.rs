//! Viewer identity read from the signed session cookie.
//!
//! Sessions are minted by the authentication service sharing our cookie key;
//! this adapter only reads the `user_id` entry. A missing or malformed entry
//! means an anonymous viewer.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Request extractor exposing the optional viewer.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `user_id` as the session's viewer.
    #[cfg(test)]
    pub(crate) fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The authenticated viewer, or `None` for anonymous requests.
    pub fn viewer(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match UserId::new(value) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "ignoring malformed user id in session cookie");
                None
            }
        }))
    }

    /// The authenticated viewer, or `401 Unauthorized`.
    pub fn require_viewer(&self) -> Result<UserId, Error> {
        self.viewer()?
            .ok_or_else(|| Error::unauthorized("authentication credentials were not provided"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    const CHEF: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let body = session
            .viewer()?
            .map_or_else(|| "anonymous".to_owned(), |id| id.to_string());
        Ok(HttpResponse::Ok().body(body))
    }

    async fn private(session: SessionContext) -> Result<HttpResponse, Error> {
        session.require_viewer()?;
        Ok(HttpResponse::NoContent().finish())
    }

    #[rstest]
    #[actix_web::test]
    async fn stored_viewer_is_read_back() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        let id = UserId::new(CHEF).expect("fixture id");
                        session.persist_user(&id)?;
                        Ok::<_, Error>(HttpResponse::Ok().finish())
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let cookie = session_cookie(&app, "/login").await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(test::read_body(res).await, CHEF);
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_requests_have_no_viewer_and_are_rejected_when_required() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/whoami", web::get().to(whoami))
                .route("/private", web::get().to(private)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(test::read_body(res).await, "anonymous");

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/private").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_session_entry_is_treated_as_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/tamper",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("set invalid user id");
                        HttpResponse::Ok()
                    }),
                )
                .route("/private", web::get().to(private)),
        )
        .await;

        let cookie = session_cookie(&app, "/tamper").await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/private").cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
