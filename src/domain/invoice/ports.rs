use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Invoice, InvoiceChanges, NewInvoice};
use super::errors::InvoiceError;

/// Each method issues exactly one SQL statement.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError>;
  async fn update(&self, id: Uuid, changes: InvoiceChanges) -> Result<Invoice, InvoiceError>;
  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
  async fn list_latest(&self, limit: i64) -> Result<Vec<Invoice>, InvoiceError>;
}

/// Cache of rendered responses keyed by request path.
///
/// Every path carries a generation that `revalidate` bumps. A page read before a
/// revalidation is never stored after it.
#[async_trait]
pub trait PageCache: Send + Sync {
  async fn get(&self, path: &str) -> Result<Option<String>, InvoiceError>;
  /// Current generation of `path`; 0 until it is first revalidated.
  async fn generation(&self, path: &str) -> Result<u64, InvoiceError>;
  /// Stores `body` only while `path` is still at `generation`. Returns whether it was stored.
  async fn put(&self, path: &str, body: String, generation: u64) -> Result<bool, InvoiceError>;
  /// Drops the cached entry and bumps the generation so the next read of `path` is served fresh.
  async fn revalidate(&self, path: &str) -> Result<(), InvoiceError>;
}
