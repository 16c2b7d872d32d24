use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::{
  CustomerId, Invoice, InvoiceChanges, InvoiceError, InvoiceRepository, InvoiceStatus,
  NewInvoice,
};

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  customer_id: String,
  amount: i64,
  status: String,
  date: NaiveDate,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    Ok(Invoice {
      id: row.id,
      customer_id: CustomerId::new(row.customer_id)?,
      amount: row.amount,
      status: InvoiceStatus::from_str(&row.status)?,
      date: row.date,
    })
  }
}

/// Every method issues exactly one statement
pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, amount, status, date
            "#,
    )
    .bind(invoice.customer_id.value())
    .bind(invoice.amount)
    .bind(invoice.status.as_str())
    .bind(invoice.date)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, id: Uuid, changes: InvoiceChanges) -> Result<Invoice, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            UPDATE invoices
            SET customer_id = $2, amount = $3, status = $4
            WHERE id = $1
            RETURNING id, customer_id, amount, status, date
            "#,
    )
    .bind(id)
    .bind(changes.customer_id.value())
    .bind(changes.amount)
    .bind(changes.status.as_str())
    .fetch_optional(&self.pool)
    .await?
    .ok_or(InvoiceError::InvoiceNotFound(id))?;

    row.try_into()
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::InvoiceNotFound(id));
    }

    Ok(())
  }

  async fn list_latest(&self, limit: i64) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, customer_id, amount, status, date
            FROM invoices
            ORDER BY date DESC, id
            LIMIT $1
            "#,
    )
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Invoice::try_from).collect()
  }
}
