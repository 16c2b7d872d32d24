use std::sync::Arc;
use uuid::Uuid;

use super::state::{ActionOutcome, INVOICES_PATH, revalidate_path};
use crate::domain::invoice::{InvoiceRepository, PageCache};

#[derive(Debug, Clone, Copy)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: Uuid,
}

pub struct DeleteInvoiceUseCase {
  invoice_repo: Arc<dyn InvoiceRepository>,
  page_cache: Arc<dyn PageCache>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_repo: Arc<dyn InvoiceRepository>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      invoice_repo,
      page_cache,
    }
  }

  /// Deletes one invoice and revalidates the listing. Never redirects; a failed delete is
  /// only logged.
  pub async fn execute(&self, command: DeleteInvoiceCommand) -> ActionOutcome {
    match self.invoice_repo.delete(command.invoice_id).await {
      Ok(()) => tracing::info!("Deleted invoice {}", command.invoice_id),
      Err(e) => tracing::error!("Failed to delete invoice {}: {}", command.invoice_id, e),
    }

    revalidate_path(self.page_cache.as_ref(), INVOICES_PATH).await;
    ActionOutcome::Revalidated(INVOICES_PATH.to_string())
  }
}
