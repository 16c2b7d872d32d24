use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::auth::SignInError;
use crate::domain::invoice::InvoiceError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let (error_type, message) = match self {
      ApiError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(ErrorResponse {
        error: error_type.to_string(),
        message,
      })
  }
}

/// Only unclassified sign-in failures reach the HTTP layer as errors
impl From<SignInError> for ApiError {
  fn from(error: SignInError) -> Self {
    ApiError::Internal(error.to_string())
  }
}

/// Form input never reaches here; a failing listing is a server fault, stored rows included
impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    ApiError::Internal(error.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::AuthErrorKind;
  use crate::domain::invoice::ValueObjectError;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_sign_in_errors_become_internal() {
    let other: ApiError = SignInError::Other(anyhow::anyhow!("boom")).into();
    let auth: ApiError = SignInError::Auth(AuthErrorKind::Configuration).into();

    assert_eq!(other.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(auth.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_database_errors_become_internal() {
    let api_error: ApiError = InvoiceError::Database(sqlx::Error::PoolTimedOut).into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_corrupt_stored_rows_become_internal() {
    let corrupt = ValueObjectError::InvalidStatus("Unknown status: draft".to_string());
    let api_error: ApiError = InvoiceError::Validation(corrupt).into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[actix_web::test]
  async fn test_internal_error_body_hides_details() {
    let response = ApiError::Internal("connection refused".to_string()).error_response();
    let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
    let json: ErrorResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(json.error, "internal_error");
    assert!(!json.message.contains("connection refused"));
  }
}
