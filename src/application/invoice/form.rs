use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::invoice::{Amount, CustomerId, InvoiceStatus, ValueObjectError};

const CUSTOMER_MESSAGE: &str = "Please select a customer.";
const AMOUNT_MESSAGE: &str = "Please enter an amount greater than 0";
const STATUS_MESSAGE: &str = "Please select an invoice status";

/// Invoice fields as submitted by the create and edit forms.
///
/// Every field is read as text; a field missing from the submission is empty.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InvoiceForm {
  #[serde(rename = "customerId", default)]
  #[validate(custom(function = "validate_customer_id"))]
  pub customer_id: String,

  #[serde(default)]
  #[validate(custom(function = "validate_amount"))]
  pub amount: String,

  #[serde(default)]
  #[validate(custom(function = "validate_status"))]
  pub status: String,
}

/// Field-level messages keyed the way the form names its inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
  #[serde(rename = "customerId", skip_serializing_if = "Option::is_none")]
  pub customer_id: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub amount: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<Vec<String>>,
}

impl From<ValidationErrors> for FieldErrors {
  fn from(errors: ValidationErrors) -> Self {
    let mut fields = FieldErrors::default();

    for (field, errors) in errors.field_errors() {
      let messages: Vec<String> = errors
        .iter()
        .map(|error| {
          error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid field: {}", field))
        })
        .collect();

      match &*field {
        "customer_id" => fields.customer_id = Some(messages),
        "amount" => fields.amount = Some(messages),
        "status" => fields.status = Some(messages),
        other => tracing::warn!("Dropping errors for unexpected form field {}", other),
      }
    }

    fields
  }
}

/// Form data that passed validation, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInvoice {
  pub customer_id: CustomerId,
  /// Minor units (cents)
  pub amount: i64,
  pub status: InvoiceStatus,
}

impl InvoiceForm {
  /// Runs the field rules and converts the amount to minor units.
  ///
  /// All failing fields are reported together.
  pub fn validate_fields(&self) -> Result<ValidInvoice, FieldErrors> {
    self.validate().map_err(FieldErrors::from)?;

    self.convert().map_err(|e| {
      tracing::warn!("Validated invoice form failed to convert: {}", e);
      FieldErrors {
        amount: Some(vec![AMOUNT_MESSAGE.to_string()]),
        ..FieldErrors::default()
      }
    })
  }

  fn convert(&self) -> Result<ValidInvoice, ValueObjectError> {
    Ok(ValidInvoice {
      customer_id: CustomerId::new(self.customer_id.as_str())?,
      amount: Amount::parse(&self.amount)?.to_minor_units()?,
      status: InvoiceStatus::from_str(&self.status)?,
    })
  }
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
  ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_customer_id(value: &str) -> Result<(), ValidationError> {
  CustomerId::new(value)
    .map(|_| ())
    .map_err(|_| failure("customer_id", CUSTOMER_MESSAGE))
}

fn validate_amount(value: &str) -> Result<(), ValidationError> {
  Amount::parse(value)
    .and_then(|amount| amount.to_minor_units())
    .map(|_| ())
    .map_err(|_| failure("amount", AMOUNT_MESSAGE))
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
  InvoiceStatus::from_str(value)
    .map(|_| ())
    .map_err(|_| failure("status", STATUS_MESSAGE))
}
