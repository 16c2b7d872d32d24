use std::sync::Arc;

use crate::domain::auth::{AuthErrorKind, Credentials, CredentialsProvider, Session, SignInError};

const INVALID_CREDENTIALS: &str = "Invalid credentials.";
const GENERIC_FAILURE: &str = "Something went wrong.";

/// Result of a sign-in attempt the login form can render
#[derive(Debug)]
pub enum AuthenticateOutcome {
  SignedIn(Session),
  Failed(String),
}

/// Use case for signing a user in with email and password
pub struct AuthenticateUseCase {
  provider: Arc<dyn CredentialsProvider>,
}

impl AuthenticateUseCase {
  /// Creates a new instance of AuthenticateUseCase
  pub fn new(provider: Arc<dyn CredentialsProvider>) -> Self {
    Self { provider }
  }

  /// Runs the sign-in and maps classified failures to a user-facing message
  ///
  /// # Errors
  /// Returns `SignInError::Other` untouched when the provider fails in a way it
  /// could not classify.
  pub async fn execute(
    &self,
    credentials: Credentials,
  ) -> Result<AuthenticateOutcome, SignInError> {
    let email = credentials.email.clone();

    match self.provider.sign_in(credentials).await {
      Ok(session) => {
        tracing::info!("User {} signed in", session.user_id);
        Ok(AuthenticateOutcome::SignedIn(session))
      }
      Err(SignInError::Auth(kind)) => {
        tracing::info!("Sign-in for {} failed: {}", email, kind.as_str());
        let message = match kind {
          AuthErrorKind::CredentialsSignin => INVALID_CREDENTIALS,
          _ => GENERIC_FAILURE,
        };
        Ok(AuthenticateOutcome::Failed(message.to_string()))
      }
      Err(other) => {
        tracing::error!("Sign-in for {} aborted: {}", email, other);
        Err(other)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::SessionToken;
  use async_trait::async_trait;
  use chrono::Utc;
  use uuid::Uuid;

  struct StubProvider(fn() -> Result<Session, SignInError>);

  #[async_trait]
  impl CredentialsProvider for StubProvider {
    async fn sign_in(&self, _credentials: Credentials) -> Result<Session, SignInError> {
      (self.0)()
    }
  }

  fn credentials() -> Credentials {
    Credentials {
      email: "user@nextmail.com".to_string(),
      password: "123456".to_string(),
    }
  }

  async fn run(
    result: fn() -> Result<Session, SignInError>,
  ) -> Result<AuthenticateOutcome, SignInError> {
    AuthenticateUseCase::new(Arc::new(StubProvider(result)))
      .execute(credentials())
      .await
  }

  fn failed_message(outcome: AuthenticateOutcome) -> String {
    match outcome {
      AuthenticateOutcome::Failed(message) => message,
      other => panic!("expected failure, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_successful_sign_in_returns_session() {
    let outcome = run(|| {
      Ok(Session {
        user_id: Uuid::nil(),
        token: SessionToken::generate(),
        expires_at: Utc::now(),
      })
    })
    .await
    .unwrap();

    assert!(matches!(outcome, AuthenticateOutcome::SignedIn(s) if s.user_id == Uuid::nil()));
  }

  #[tokio::test]
  async fn test_credentials_signin_maps_to_invalid_credentials() {
    let outcome = run(|| Err(SignInError::Auth(AuthErrorKind::CredentialsSignin)))
      .await
      .unwrap();
    assert_eq!(failed_message(outcome), "Invalid credentials.");
  }

  #[tokio::test]
  async fn test_other_auth_kinds_map_to_generic_message() {
    let callback = run(|| Err(SignInError::Auth(AuthErrorKind::CallbackRoute)))
      .await
      .unwrap();
    let configuration = run(|| Err(SignInError::Auth(AuthErrorKind::Configuration)))
      .await
      .unwrap();

    assert_eq!(failed_message(callback), "Something went wrong.");
    assert_eq!(failed_message(configuration), "Something went wrong.");
  }

  #[tokio::test]
  async fn test_unclassified_errors_are_propagated() {
    let result = run(|| Err(SignInError::Other(anyhow::anyhow!("redirect")))).await;

    match result {
      Err(SignInError::Other(e)) => assert_eq!(e.to_string(), "redirect"),
      other => panic!("expected propagated error, got {:?}", other),
    }
  }
}
