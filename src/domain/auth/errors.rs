use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Failure kinds reported by a credentials provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
  /// Unknown email, wrong password, or malformed credentials
  CredentialsSignin,
  /// The provider failed while looking up or checking the user
  CallbackRoute,
  /// The provider is misconfigured (e.g. unusable stored hash)
  Configuration,
}

impl AuthErrorKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      AuthErrorKind::CredentialsSignin => "CredentialsSignin",
      AuthErrorKind::CallbackRoute => "CallbackRouteError",
      AuthErrorKind::Configuration => "Configuration",
    }
  }
}

/// Error returned by a sign-in attempt
#[derive(Debug, Error)]
pub enum SignInError {
  /// A failure the provider knows how to classify
  #[error("Authentication failed: {}", .0.as_str())]
  Auth(AuthErrorKind),

  /// Anything else; callers must not swallow it
  #[error(transparent)]
  Other(#[from] anyhow::Error),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

/// Session store errors
#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Session store unavailable: {0}")]
  Store(String),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
        RepositoryError::DuplicateKey(db_err.message().to_string())
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<redis::RedisError> for SessionError {
  fn from(error: redis::RedisError) -> Self {
    SessionError::Store(error.to_string())
  }
}
