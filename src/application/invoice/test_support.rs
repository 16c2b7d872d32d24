//! Recording doubles for the invoice ports.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::invoice::{
  Invoice, InvoiceChanges, InvoiceError, InvoiceRepository, InvoiceStatus, NewInvoice,
};

/// One entry per SQL statement the repository would have issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
  Insert(NewInvoice),
  Update(Uuid, InvoiceChanges),
  Delete(Uuid),
  Select(i64),
}

#[derive(Default)]
pub struct RecordingInvoiceRepository {
  statements: Mutex<Vec<Statement>>,
  rows: Mutex<Vec<Invoice>>,
  fail: bool,
}

impl RecordingInvoiceRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Every statement is recorded, then fails as if the database were down
  pub fn failing() -> Self {
    Self {
      fail: true,
      ..Self::default()
    }
  }

  pub fn with_rows(rows: Vec<Invoice>) -> Self {
    Self {
      rows: Mutex::new(rows),
      ..Self::default()
    }
  }

  pub fn statements(&self) -> Vec<Statement> {
    self.statements.lock().unwrap().clone()
  }

  fn record(&self, statement: Statement) -> Result<(), InvoiceError> {
    self.statements.lock().unwrap().push(statement);
    if self.fail {
      return Err(InvoiceError::Database(sqlx::Error::PoolTimedOut));
    }
    Ok(())
  }
}

#[async_trait]
impl InvoiceRepository for RecordingInvoiceRepository {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    self.record(Statement::Insert(invoice.clone()))?;
    let created = Invoice {
      id: Uuid::new_v4(),
      customer_id: invoice.customer_id,
      amount: invoice.amount,
      status: invoice.status,
      date: invoice.date,
    };
    self.rows.lock().unwrap().push(created.clone());
    Ok(created)
  }

  async fn update(&self, id: Uuid, changes: InvoiceChanges) -> Result<Invoice, InvoiceError> {
    self.record(Statement::Update(id, changes.clone()))?;
    let mut rows = self.rows.lock().unwrap();
    let row = rows
      .iter_mut()
      .find(|row| row.id == id)
      .ok_or(InvoiceError::InvoiceNotFound(id))?;
    row.customer_id = changes.customer_id;
    row.amount = changes.amount;
    row.status = changes.status;
    Ok(row.clone())
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    self.record(Statement::Delete(id))?;
    let mut rows = self.rows.lock().unwrap();
    let before = rows.len();
    rows.retain(|row| row.id != id);
    if rows.len() == before {
      return Err(InvoiceError::InvoiceNotFound(id));
    }
    Ok(())
  }

  async fn list_latest(&self, limit: i64) -> Result<Vec<Invoice>, InvoiceError> {
    self.record(Statement::Select(limit))?;
    let mut rows = self.rows.lock().unwrap().clone();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows.truncate(usize::try_from(limit).unwrap_or(0));
    Ok(rows)
  }
}

pub fn stored_invoice(customer_id: &str, amount: i64, date: NaiveDate) -> Invoice {
  Invoice {
    id: Uuid::new_v4(),
    customer_id: crate::domain::invoice::CustomerId::new(customer_id).unwrap(),
    amount,
    status: InvoiceStatus::Pending,
    date,
  }
}
