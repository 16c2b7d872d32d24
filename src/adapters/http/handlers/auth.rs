use actix_web::{
  HttpRequest, HttpResponse,
  cookie::{Cookie, SameSite, time::Duration},
  web,
};
use chrono::Utc;
use std::sync::Arc;

use super::see_other;
use crate::adapters::http::dtos::{LoginFormData, MessageResponse};
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::middleware::web_auth::{LOGIN_PATH, SESSION_COOKIE};
use crate::application::auth::{AuthenticateOutcome, AuthenticateUseCase, LogoutUseCase};
use crate::domain::auth::Credentials;

const DASHBOARD_PATH: &str = "/dashboard";

/// Handle login form submission
pub async fn login_submit(
  form: web::Form<LoginFormData>,
  use_case: web::Data<Arc<AuthenticateUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let form = form.into_inner();
  let credentials = Credentials {
    email: form.email,
    password: form.password,
  };

  match use_case.execute(credentials).await? {
    AuthenticateOutcome::SignedIn(session) => {
      let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
      let cookie = Cookie::build(SESSION_COOKIE, session.token.into_inner())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age))
        .finish();

      let mut response = see_other(DASHBOARD_PATH);
      response
        .add_cookie(&cookie)
        .map_err(|e| ApiError::Internal(format!("Failed to set session cookie: {}", e)))?;
      Ok(response)
    }
    AuthenticateOutcome::Failed(message) => {
      Ok(HttpResponse::Unauthorized().json(MessageResponse { message }))
    }
  }
}

/// Revoke the session (if any) and clear the cookie
pub async fn logout(req: HttpRequest, use_case: web::Data<Arc<LogoutUseCase>>) -> HttpResponse {
  if let Some(cookie) = req.cookie(SESSION_COOKIE) {
    if let Err(e) = use_case.execute(cookie.value().to_string()).await {
      tracing::warn!("Failed to revoke session on logout: {}", e);
    }
  }

  let cookie = Cookie::build(SESSION_COOKIE, "")
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(Duration::seconds(0))
    .finish();

  let mut response = see_other(LOGIN_PATH);
  if let Err(e) = response.add_cookie(&cookie) {
    tracing::warn!("Failed to clear session cookie: {}", e);
  }
  response
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::{
    AuthErrorKind, CredentialsProvider, Session, SessionStore, SessionToken, SignInError,
  };
  use crate::infrastructure::session::InMemorySessionStore;
  use actix_web::{
    App,
    http::{StatusCode, header},
    test::{self, TestRequest},
  };
  use async_trait::async_trait;
  use uuid::Uuid;

  /// Accepts exactly one email/password pair
  struct SingleUserProvider {
    sessions: Arc<InMemorySessionStore>,
    user_id: Uuid,
  }

  #[async_trait]
  impl CredentialsProvider for SingleUserProvider {
    async fn sign_in(&self, credentials: Credentials) -> Result<Session, SignInError> {
      if credentials.email == "user@nextmail.com" && credentials.password == "123456" {
        self
          .sessions
          .create(self.user_id, chrono::Duration::hours(1))
          .await
          .map_err(|e| SignInError::Other(e.into()))
      } else if credentials.email == "explode@nextmail.com" {
        Err(SignInError::Other(anyhow::anyhow!("provider exploded")))
      } else if credentials.email == "misconfigured@nextmail.com" {
        Err(SignInError::Auth(AuthErrorKind::Configuration))
      } else {
        Err(SignInError::Auth(AuthErrorKind::CredentialsSignin))
      }
    }
  }

  fn configure(cfg: &mut web::ServiceConfig, sessions: Arc<InMemorySessionStore>, user_id: Uuid) {
    let provider = Arc::new(SingleUserProvider {
      sessions: sessions.clone(),
      user_id,
    });
    cfg
      .app_data(web::Data::new(Arc::new(AuthenticateUseCase::new(provider))))
      .app_data(web::Data::new(Arc::new(LogoutUseCase::new(sessions))))
      .route("/login", web::post().to(login_submit))
      .route("/logout", web::post().to(logout));
  }

  fn login_request(email: &str, password: &str) -> actix_web::test::TestRequest {
    TestRequest::post()
      .uri("/login")
      .set_form([("email", email), ("password", password)])
  }

  #[actix_web::test]
  async fn test_valid_login_sets_cookie_and_redirects() {
    let sessions = Arc::new(InMemorySessionStore::new());
    let user_id = Uuid::new_v4();
    let store = sessions.clone();
    let app =
      test::init_service(App::new().configure(|cfg| configure(cfg, store, user_id))).await;

    let resp = test::call_service(
      &app,
      login_request("user@nextmail.com", "123456").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");
    let cookie = resp
      .response()
      .cookies()
      .find(|c| c.name() == SESSION_COOKIE)
      .expect("session cookie");
    assert_eq!(cookie.http_only(), Some(true));

    let token = SessionToken::from_string(cookie.value()).unwrap();
    assert_eq!(sessions.resolve(&token).await.unwrap(), Some(user_id));
  }

  #[actix_web::test]
  async fn test_wrong_password_returns_invalid_credentials() {
    let sessions = Arc::new(InMemorySessionStore::new());
    let app = test::init_service(
      App::new().configure(|cfg| configure(cfg, sessions, Uuid::new_v4())),
    )
    .await;

    let resp = test::call_service(
      &app,
      login_request("user@nextmail.com", "wrong!").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: MessageResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Invalid credentials.");
  }

  #[actix_web::test]
  async fn test_other_auth_failure_returns_generic_message() {
    let sessions = Arc::new(InMemorySessionStore::new());
    let app = test::init_service(
      App::new().configure(|cfg| configure(cfg, sessions, Uuid::new_v4())),
    )
    .await;

    let resp = test::call_service(
      &app,
      login_request("misconfigured@nextmail.com", "123456").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: MessageResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Something went wrong.");
  }

  #[actix_web::test]
  async fn test_unclassified_failure_is_a_server_error() {
    let sessions = Arc::new(InMemorySessionStore::new());
    let app = test::init_service(
      App::new().configure(|cfg| configure(cfg, sessions, Uuid::new_v4())),
    )
    .await;

    let resp = test::call_service(
      &app,
      login_request("explode@nextmail.com", "123456").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[actix_web::test]
  async fn test_logout_revokes_session_and_clears_cookie() {
    let sessions = Arc::new(InMemorySessionStore::new());
    let session = sessions
      .create(Uuid::new_v4(), chrono::Duration::hours(1))
      .await
      .unwrap();
    let store = sessions.clone();
    let app = test::init_service(
      App::new().configure(|cfg| configure(cfg, store, Uuid::new_v4())),
    )
    .await;

    let req = TestRequest::post()
      .uri("/logout")
      .cookie(Cookie::new(SESSION_COOKIE, session.token.as_str().to_string()))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
    let cleared = resp
      .response()
      .cookies()
      .find(|c| c.name() == SESSION_COOKIE)
      .expect("cleared cookie");
    assert_eq!(cleared.value(), "");
    assert_eq!(sessions.resolve(&session.token).await.unwrap(), None);
  }

  #[actix_web::test]
  async fn test_logout_without_cookie_still_redirects() {
    let sessions = Arc::new(InMemorySessionStore::new());
    let app = test::init_service(
      App::new().configure(|cfg| configure(cfg, sessions, Uuid::new_v4())),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::post().uri("/logout").to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  }
}
