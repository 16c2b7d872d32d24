use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::{HashError, RepositoryError, SessionError, SignInError};
use super::value_objects::{Email, Password, SessionToken};

/// Email and password exactly as submitted by the sign-in form
#[derive(Clone)]
pub struct Credentials {
  pub email: String,
  pub password: String,
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("email", &self.email)
      .field("password", &"***")
      .finish()
  }
}

/// Verifies credentials and opens a session
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
  async fn sign_in(&self, credentials: Credentials) -> Result<Session, SignInError>;
}

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, RepositoryError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password into a PHC string
  async fn hash(&self, password: &Password) -> Result<String, HashError>;

  /// Verifies a plain text password against a stored PHC string
  async fn verify(&self, password: &Password, password_hash: &str) -> Result<bool, HashError>;
}

/// Storage for live sessions, keyed by the token digest
#[async_trait]
pub trait SessionStore: Send + Sync {
  async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<Session, SessionError>;
  async fn resolve(&self, token: &SessionToken) -> Result<Option<Uuid>, SessionError>;
  async fn revoke(&self, token: &SessionToken) -> Result<(), SessionError>;
}
