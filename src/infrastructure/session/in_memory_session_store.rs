use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::{Session, SessionError, SessionStore, SessionToken, TokenDigest};

/// Process-local session store used when Redis is disabled and in tests
#[derive(Default)]
pub struct InMemorySessionStore {
  sessions: RwLock<HashMap<TokenDigest, (Uuid, DateTime<Utc>)>>,
}

impl InMemorySessionStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
  async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<Session, SessionError> {
    let token = SessionToken::generate();
    let expires_at = Utc::now()
      .checked_add_signed(ttl)
      .ok_or_else(|| SessionError::Store(format!("invalid session ttl: {}", ttl)))?;

    self
      .sessions
      .write()
      .map_err(|e| SessionError::Store(e.to_string()))?
      .insert(token.digest(), (user_id, expires_at));

    Ok(Session {
      user_id,
      token,
      expires_at,
    })
  }

  async fn resolve(&self, token: &SessionToken) -> Result<Option<Uuid>, SessionError> {
    let sessions = self
      .sessions
      .read()
      .map_err(|e| SessionError::Store(e.to_string()))?;

    Ok(
      sessions
        .get(&token.digest())
        .filter(|(_, expires_at)| *expires_at > Utc::now())
        .map(|(user_id, _)| *user_id),
    )
  }

  async fn revoke(&self, token: &SessionToken) -> Result<(), SessionError> {
    self
      .sessions
      .write()
      .map_err(|e| SessionError::Store(e.to_string()))?
      .remove(&token.digest());
    Ok(())
  }
}
