use chrono::Duration;
use std::sync::Arc;

use super::entities::Session;
use super::errors::{AuthErrorKind, HashError, SignInError};
use super::ports::{Credentials, CredentialsProvider, PasswordHasher, SessionStore, UserRepository};
use super::value_objects::{Email, Password};

/// Credentials provider backed by the users table and Argon2 password hashes
pub struct PasswordCredentialsProvider {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  session_store: Arc<dyn SessionStore>,
  session_ttl: Duration,
}

impl PasswordCredentialsProvider {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    session_store: Arc<dyn SessionStore>,
    session_ttl: Duration,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      session_store,
      session_ttl,
    }
  }
}

#[async_trait::async_trait]
impl CredentialsProvider for PasswordCredentialsProvider {
  async fn sign_in(&self, credentials: Credentials) -> Result<Session, SignInError> {
    let invalid = || SignInError::Auth(AuthErrorKind::CredentialsSignin);

    // Malformed input is reported the same way as a wrong password
    let email = Email::new(credentials.email).map_err(|_| invalid())?;
    let password = Password::new(credentials.password).map_err(|_| invalid())?;

    let user = self
      .user_repo
      .find_by_email(&email)
      .await
      .map_err(|e| {
        tracing::error!("Failed to look up user during sign-in: {}", e);
        SignInError::Auth(AuthErrorKind::CallbackRoute)
      })?
      .ok_or_else(|| {
        tracing::debug!("Sign-in attempt for unknown email");
        invalid()
      })?;

    let matches = self
      .password_hasher
      .verify(&password, &user.password_hash)
      .await
      .map_err(|e| match e {
        HashError::InvalidFormat => {
          tracing::error!("Stored password hash for user_id={} is unusable", user.id);
          SignInError::Auth(AuthErrorKind::Configuration)
        }
        HashError::HashingFailed(msg) => {
          tracing::error!("Password verification failed: {}", msg);
          SignInError::Auth(AuthErrorKind::CallbackRoute)
        }
      })?;

    if !matches {
      tracing::info!("Invalid password for user_id={}", user.id);
      return Err(invalid());
    }

    let session = self
      .session_store
      .create(user.id, self.session_ttl)
      .await
      .map_err(|e| SignInError::Other(anyhow::Error::new(e).context("failed to create session")))?;

    tracing::info!("User signed in: user_id={}", user.id);
    Ok(session)
  }
}
