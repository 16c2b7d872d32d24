use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header,
};
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc, sync::Arc};

use crate::domain::auth::{AuthenticatedUser, SessionStore, SessionToken};

pub const SESSION_COOKIE: &str = "session_token";
pub const LOGIN_PATH: &str = "/login";

/// Cookie-session guard. Requests without a live session are redirected to the login page.
pub struct WebAuthMiddleware {
  session_store: Arc<dyn SessionStore>,
}

impl WebAuthMiddleware {
  pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
    Self { session_store }
  }
}

impl<S, B> Transform<S, ServiceRequest> for WebAuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = WebAuthMiddlewareService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(WebAuthMiddlewareService {
      service: Rc::new(service),
      session_store: self.session_store.clone(),
    }))
  }
}

pub struct WebAuthMiddlewareService<S> {
  service: Rc<S>,
  session_store: Arc<dyn SessionStore>,
}

async fn resolve_user(
  session_store: &dyn SessionStore,
  cookie_value: Option<String>,
) -> Option<AuthenticatedUser> {
  let token = SessionToken::from_string(cookie_value?).ok()?;

  match session_store.resolve(&token).await {
    Ok(user_id) => user_id.map(|user_id| AuthenticatedUser { user_id }),
    Err(e) => {
      tracing::warn!("Session lookup failed: {}", e);
      None
    }
  }
}

impl<S, B> Service<ServiceRequest> for WebAuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let cookie_value = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
    let session_store = self.session_store.clone();
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      match resolve_user(session_store.as_ref(), cookie_value).await {
        Some(user) => {
          req.extensions_mut().insert(user);
          let res = service.call(req).await?;
          Ok(res.map_into_left_body())
        }
        None => {
          tracing::debug!("No valid session for {}, redirecting to login", req.path());
          let res = req.into_response(
            HttpResponse::Found()
              .insert_header((header::LOCATION, LOGIN_PATH))
              .finish(),
          );
          Ok(res.map_into_right_body())
        }
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::session::InMemorySessionStore;
  use actix_web::{
    App, HttpRequest, cookie::Cookie,
    http::StatusCode,
    test::{self, TestRequest},
    web,
  };
  use chrono::Duration;
  use uuid::Uuid;

  async fn whoami(req: HttpRequest) -> HttpResponse {
    match req.extensions().get::<AuthenticatedUser>() {
      Some(user) => HttpResponse::Ok().body(user.user_id.to_string()),
      None => HttpResponse::InternalServerError().finish(),
    }
  }

  #[actix_web::test]
  async fn test_missing_or_unknown_session_redirects_to_login() {
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let app = test::init_service(
      App::new().service(
        web::scope("/dashboard")
          .wrap(WebAuthMiddleware::new(store))
          .route("", web::get().to(whoami)),
      ),
    )
    .await;

    let no_cookie =
      test::call_service(&app, TestRequest::get().uri("/dashboard").to_request()).await;
    let unknown = test::call_service(
      &app,
      TestRequest::get()
        .uri("/dashboard")
        .cookie(Cookie::new(SESSION_COOKIE, SessionToken::generate().into_inner()))
        .to_request(),
    )
    .await;
    let garbage = test::call_service(
      &app,
      TestRequest::get()
        .uri("/dashboard")
        .cookie(Cookie::new(SESSION_COOKIE, "garbage"))
        .to_request(),
    )
    .await;

    for resp in [no_cookie, unknown, garbage] {
      assert_eq!(resp.status(), StatusCode::FOUND);
      assert_eq!(resp.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
    }
  }

  #[actix_web::test]
  async fn test_valid_session_attaches_user() {
    let store = Arc::new(InMemorySessionStore::new());
    let user_id = Uuid::new_v4();
    let session = store.create(user_id, Duration::hours(1)).await.unwrap();
    let app = test::init_service(
      App::new().service(
        web::scope("/dashboard")
          .wrap(WebAuthMiddleware::new(store.clone()))
          .route("", web::get().to(whoami)),
      ),
    )
    .await;

    let req = TestRequest::get()
      .uri("/dashboard")
      .cookie(Cookie::new(SESSION_COOKIE, session.token.into_inner()))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, user_id.to_string().as_bytes());
  }
}
