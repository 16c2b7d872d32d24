use serde::Serialize;

use super::form::FieldErrors;
use crate::domain::invoice::PageCache;

/// Listing page every invoice action revalidates
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// State handed back to the form after a failed action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<FieldErrors>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl FormState {
  pub fn invalid(errors: FieldErrors, message: &str) -> Self {
    Self {
      errors: Some(errors),
      message: Some(message.to_string()),
    }
  }

  pub fn failed(message: &str) -> Self {
    Self {
      errors: None,
      message: Some(message.to_string()),
    }
  }
}

/// What the caller should do once an action has run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
  /// Navigate to the path; its cache entry was already revalidated
  Redirect(String),
  /// Stay on the page; the path's cache entry was revalidated
  Revalidated(String),
  /// Nothing was written or the write failed
  Rejected(FormState),
}

/// Drops the cached page for `path`. Cache failures are logged and never fail the action.
pub(crate) async fn revalidate_path(cache: &dyn PageCache, path: &str) {
  match cache.revalidate(path).await {
    Ok(()) => tracing::debug!("Revalidated {}", path),
    Err(e) => tracing::warn!("Failed to revalidate {}: {}", path, e),
  }
}
