use serde::{Deserialize, Serialize};

/// Sign-in form as posted by the login page
#[derive(Debug, Clone, Deserialize)]
pub struct LoginFormData {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
}

/// Body of a rejected sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,
}
