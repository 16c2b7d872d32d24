use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password is too short (minimum 6 characters)")]
  PasswordTooShort,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Invalid token format")]
  InvalidToken,
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();
    let normalized = email.trim().to_lowercase();

    if !normalized.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    Ok(Self(normalized))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 6;
  const MAX_LENGTH: usize = 128;

  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.chars().count() < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    if password.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// Session Token (given to the browser) and its stored digest
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
  const BYTES: usize = 32;

  /// Generates a new random token from the OS RNG, hex encoded
  pub fn generate() -> Self {
    let mut bytes = [0u8; Self::BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    Self(hex::encode(bytes))
  }

  /// Parses a token received from a cookie
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();
    let valid = token.len() == Self::BYTES * 2 && token.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
      return Err(ValueObjectError::InvalidToken);
    }
    Ok(Self(token.to_ascii_lowercase()))
  }

  /// SHA-256 digest of the token; the only form that is ever persisted
  pub fn digest(&self) -> TokenDigest {
    TokenDigest(hex::encode(Sha256::digest(self.0.as_bytes())))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_is_normalized() {
    let email = Email::new(" User@Example.COM ").unwrap();
    assert_eq!(email.as_str(), "user@example.com");
  }

  #[test]
  fn test_email_rejects_garbage() {
    assert!(Email::new("not-an-email").is_err());
    assert!(Email::new("").is_err());
  }

  #[test]
  fn test_password_length_bounds() {
    assert_eq!(
      Password::new("12345").unwrap_err(),
      ValueObjectError::PasswordTooShort
    );
    assert!(Password::new("123456").is_ok());
    assert_eq!(
      Password::new("x".repeat(129)).unwrap_err(),
      ValueObjectError::PasswordTooLong
    );
  }

  #[test]
  fn test_password_debug_is_redacted() {
    let password = Password::new("hunter22").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
  }

  #[test]
  fn test_session_token_round_trips_through_cookie_value() {
    let token = SessionToken::generate();
    assert_eq!(token.as_str().len(), 64);

    let parsed = SessionToken::from_string(token.as_str()).unwrap();
    assert_eq!(parsed.digest(), token.digest());
  }

  #[test]
  fn test_session_token_rejects_malformed_values() {
    assert!(SessionToken::from_string("").is_err());
    assert!(SessionToken::from_string("abc").is_err());
    assert!(SessionToken::from_string("z".repeat(64)).is_err());
  }

  #[test]
  fn test_digest_differs_from_token() {
    let token = SessionToken::generate();
    assert_ne!(token.digest().as_str(), token.as_str());
    assert_eq!(token.digest().as_str().len(), 64);
  }
}
