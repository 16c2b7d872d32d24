use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceRepository, InvoiceStatus, PageCache};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceListItemDto {
  pub id: Uuid,
  pub customer_id: String,
  /// Minor units (cents)
  pub amount: i64,
  /// Major units, two decimals
  pub amount_formatted: String,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

impl From<Invoice> for InvoiceListItemDto {
  fn from(invoice: Invoice) -> Self {
    Self {
      amount_formatted: invoice.formatted_amount(),
      id: invoice.id,
      customer_id: invoice.customer_id.into_inner(),
      amount: invoice.amount,
      status: invoice.status,
      date: invoice.date,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

/// Serves the invoice listing, caching the serialized body under its request path
pub struct ListInvoicesUseCase {
  invoice_repo: Arc<dyn InvoiceRepository>,
  page_cache: Arc<dyn PageCache>,
  page_size: i64,
}

impl ListInvoicesUseCase {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    page_cache: Arc<dyn PageCache>,
    page_size: i64,
  ) -> Self {
    Self {
      invoice_repo,
      page_cache,
      page_size,
    }
  }

  /// Returns the JSON body for `path`.
  pub async fn execute(&self, path: &str) -> Result<String, InvoiceError> {
    match self.page_cache.get(path).await {
      Ok(Some(body)) => {
        tracing::debug!("Serving {} from page cache", path);
        return Ok(body);
      }
      Ok(None) => {}
      Err(e) => tracing::warn!("Page cache read for {} failed: {}", path, e),
    }

    let generation = match self.page_cache.generation(path).await {
      Ok(generation) => Some(generation),
      Err(e) => {
        tracing::warn!("Page cache generation for {} unavailable: {}", path, e);
        None
      }
    };

    let invoices = self.invoice_repo.list_latest(self.page_size).await?;
    let response = ListInvoicesResponse {
      invoices: invoices.into_iter().map(InvoiceListItemDto::from).collect(),
    };
    let body = serde_json::to_string(&response)?;

    if let Some(generation) = generation {
      match self.page_cache.put(path, body.clone(), generation).await {
        Ok(true) => {}
        Ok(false) => tracing::debug!("{} was revalidated during the read; not caching", path),
        Err(e) => tracing::warn!("Page cache write for {} failed: {}", path, e),
      }
    }

    Ok(body)
  }
}
