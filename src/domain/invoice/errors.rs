use super::value_objects::ValueObjectError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Cache error: {0}")]
  Cache(String),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

impl From<redis::RedisError> for InvoiceError {
  fn from(error: redis::RedisError) -> Self {
    InvoiceError::Cache(error.to_string())
  }
}
