use std::sync::Arc;

use crate::domain::auth::{SessionError, SessionStore, SessionToken};

/// Use case for ending the caller's session
pub struct LogoutUseCase {
  session_store: Arc<dyn SessionStore>,
}

impl LogoutUseCase {
  pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
    Self { session_store }
  }

  /// Revokes the session behind `session_token`. Unknown tokens are a no-op.
  pub async fn execute(&self, session_token: String) -> Result<(), SessionError> {
    let token = SessionToken::from_string(session_token)?;
    self.session_store.revoke(&token).await?;
    tracing::debug!("Session revoked");
    Ok(())
  }
}
