use std::sync::Arc;
use uuid::Uuid;

use super::form::InvoiceForm;
use super::state::{ActionOutcome, FormState, INVOICES_PATH, revalidate_path};
use crate::domain::invoice::{InvoiceChanges, InvoiceRepository, PageCache};

const VALIDATION_MESSAGE: &str = "Missing Fields. Failed to Update Invoice.";
const DATABASE_MESSAGE: &str = "unable to update invoices";

#[derive(Debug, Clone)]
pub struct UpdateInvoiceCommand {
  pub invoice_id: Uuid,
  pub form: InvoiceForm,
}

pub struct UpdateInvoiceUseCase {
  invoice_repo: Arc<dyn InvoiceRepository>,
  page_cache: Arc<dyn PageCache>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_repo: Arc<dyn InvoiceRepository>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      invoice_repo,
      page_cache,
    }
  }

  /// Validates the form and rewrites customer, amount and status of one invoice in place.
  pub async fn execute(&self, command: UpdateInvoiceCommand) -> ActionOutcome {
    let valid = match command.form.validate_fields() {
      Ok(valid) => valid,
      Err(errors) => {
        tracing::debug!(
          "Rejected invoice update form for {}: {:?}",
          command.invoice_id,
          errors
        );
        return ActionOutcome::Rejected(FormState::invalid(errors, VALIDATION_MESSAGE));
      }
    };

    let changes = InvoiceChanges {
      customer_id: valid.customer_id,
      amount: valid.amount,
      status: valid.status,
    };

    if let Err(e) = self.invoice_repo.update(command.invoice_id, changes).await {
      tracing::error!("Failed to update invoice {}: {}", command.invoice_id, e);
      return ActionOutcome::Rejected(FormState::failed(DATABASE_MESSAGE));
    }

    tracing::info!("Updated invoice {}", command.invoice_id);
    revalidate_path(self.page_cache.as_ref(), INVOICES_PATH).await;
    ActionOutcome::Redirect(INVOICES_PATH.to_string())
  }
}
