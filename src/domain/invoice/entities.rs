use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::value_objects::{Amount, CustomerId, InvoiceStatus};

/// A stored invoice. `amount` is kept in minor units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
  pub id: Uuid,
  pub customer_id: CustomerId,
  pub amount: i64,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

impl Invoice {
  pub fn formatted_amount(&self) -> String {
    Amount::format_minor_units(self.amount)
  }
}

/// Values written by the create action. The id is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
  pub customer_id: CustomerId,
  pub amount: i64,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

/// Values written by the update action. The invoice date is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
  pub customer_id: CustomerId,
  pub amount: i64,
  pub status: InvoiceStatus,
}
