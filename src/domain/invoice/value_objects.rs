use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid customer reference: {0}")]
  InvalidCustomerId(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid invoice status: {0}")]
  InvalidStatus(String),
}

// Customer reference - opaque identifier chosen in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
  /// Width of the `customer_id` column, in characters
  pub const MAX_LENGTH: usize = 255;

  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidCustomerId(
        "Customer reference cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::InvalidCustomerId(format!(
        "Customer reference cannot exceed {} characters",
        Self::MAX_LENGTH
      )));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for CustomerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Invoice Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Pending,
  Paid,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Pending => "pending",
      InvoiceStatus::Paid => "paid",
    }
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  // Exact match: the form submits the lowercase option values.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(InvoiceStatus::Pending),
      "paid" => Ok(InvoiceStatus::Paid),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Invoice amount in major currency units (e.g. dollars).
///
/// Always strictly positive. Storage uses minor units, see [`Amount::to_minor_units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
  const MINOR_UNITS_PER_MAJOR: i64 = 100;

  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value <= Decimal::ZERO {
      return Err(ValueObjectError::InvalidAmount(
        "Amount must be greater than 0".to_string(),
      ));
    }
    Ok(Self(value))
  }

  /// Coerces submitted form text into an amount.
  pub fn parse(raw: &str) -> Result<Self, ValueObjectError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidAmount(
        "Amount is required".to_string(),
      ));
    }
    let value = Decimal::from_str(trimmed)
      .or_else(|_| Decimal::from_scientific(trimmed))
      .map_err(|_| ValueObjectError::InvalidAmount(format!("Not a number: {}", trimmed)))?;
    Self::new(value)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  /// Converts to integer minor units (cents), rounding half away from zero.
  pub fn to_minor_units(&self) -> Result<i64, ValueObjectError> {
    let scaled = self
      .0
      .checked_mul(Decimal::from(Self::MINOR_UNITS_PER_MAJOR))
      .ok_or_else(|| ValueObjectError::InvalidAmount("Amount is too large".to_string()))?
      .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let minor = scaled
      .to_i64()
      .ok_or_else(|| ValueObjectError::InvalidAmount("Amount is too large".to_string()))?;

    if minor <= 0 {
      return Err(ValueObjectError::InvalidAmount(
        "Amount is smaller than one cent".to_string(),
      ));
    }
    Ok(minor)
  }

  /// Formats stored minor units back into a major-unit string, e.g. `1050` -> `"10.50"`.
  pub fn format_minor_units(minor: i64) -> String {
    Decimal::new(minor, 2).to_string()
  }
}

impl fmt::Display for Amount {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.2}", self.0)
  }
}
