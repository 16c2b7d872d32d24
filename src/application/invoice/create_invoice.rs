use chrono::Utc;
use std::sync::Arc;

use super::form::InvoiceForm;
use super::state::{ActionOutcome, FormState, INVOICES_PATH, revalidate_path};
use crate::domain::invoice::{InvoiceRepository, NewInvoice, PageCache};

const VALIDATION_MESSAGE: &str = "Missing Fields. Failed to Create Invoice.";
const DATABASE_MESSAGE: &str = "Database Error: Failed to Create Invoice.";

pub struct CreateInvoiceUseCase {
  invoice_repo: Arc<dyn InvoiceRepository>,
  page_cache: Arc<dyn PageCache>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_repo: Arc<dyn InvoiceRepository>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      invoice_repo,
      page_cache,
    }
  }

  /// Validates the form, inserts one invoice dated today (UTC) and redirects to the listing.
  pub async fn execute(&self, form: InvoiceForm) -> ActionOutcome {
    let valid = match form.validate_fields() {
      Ok(valid) => valid,
      Err(errors) => {
        tracing::debug!("Rejected invoice create form: {:?}", errors);
        return ActionOutcome::Rejected(FormState::invalid(errors, VALIDATION_MESSAGE));
      }
    };

    let invoice = NewInvoice {
      customer_id: valid.customer_id,
      amount: valid.amount,
      status: valid.status,
      date: Utc::now().date_naive(),
    };

    match self.invoice_repo.create(invoice).await {
      Ok(created) => {
        tracing::info!("Created invoice {} ({} cents)", created.id, created.amount);
      }
      Err(e) => {
        tracing::error!("Failed to create invoice: {}", e);
        return ActionOutcome::Rejected(FormState::failed(DATABASE_MESSAGE));
      }
    }

    revalidate_path(self.page_cache.as_ref(), INVOICES_PATH).await;
    ActionOutcome::Redirect(INVOICES_PATH.to_string())
  }
}
