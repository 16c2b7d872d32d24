use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::value_objects::SessionToken;

/// A user that can sign in with email and password
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  /// Argon2id PHC string
  #[serde(skip_serializing)]
  pub password_hash: String,
}

impl User {
  pub fn new(name: String, email: String, password_hash: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      name,
      email,
      password_hash,
    }
  }
}

/// Session handed back to the browser after a successful sign-in
#[derive(Debug, Clone)]
pub struct Session {
  pub user_id: Uuid,
  pub token: SessionToken,
  pub expires_at: DateTime<Utc>,
}

/// Identity attached to requests that carry a valid session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
}
