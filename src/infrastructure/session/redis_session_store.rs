use async_trait::async_trait;
use chrono::{Duration, Utc};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use uuid::Uuid;

use crate::domain::auth::{Session, SessionError, SessionStore, SessionToken, TokenDigest};

/// Sessions stored in Redis as `session:{sha256(token)} -> user id`, expiring with the session
pub struct RedisSessionStore {
  redis: ConnectionManager,
}

impl RedisSessionStore {
  pub fn new(redis: ConnectionManager) -> Self {
    Self { redis }
  }
}

fn session_key(digest: &TokenDigest) -> String {
  format!("session:{}", digest.as_str())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
  async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<Session, SessionError> {
    let invalid_ttl = || SessionError::Store(format!("invalid session ttl: {}", ttl));
    let ttl_seconds = u64::try_from(ttl.num_seconds())
      .ok()
      .filter(|s| *s > 0)
      .ok_or_else(invalid_ttl)?;
    let expires_at = Utc::now().checked_add_signed(ttl).ok_or_else(invalid_ttl)?;

    let token = SessionToken::generate();
    let mut conn = self.redis.clone();
    let _: () = conn
      .set_ex(session_key(&token.digest()), user_id.to_string(), ttl_seconds)
      .await?;

    Ok(Session {
      user_id,
      token,
      expires_at,
    })
  }

  async fn resolve(&self, token: &SessionToken) -> Result<Option<Uuid>, SessionError> {
    let mut conn = self.redis.clone();
    let stored: Option<String> = conn.get(session_key(&token.digest())).await?;

    match stored {
      Some(value) => Uuid::parse_str(&value)
        .map(Some)
        .map_err(|e| SessionError::Store(format!("corrupt session entry: {}", e))),
      None => Ok(None),
    }
  }

  async fn revoke(&self, token: &SessionToken) -> Result<(), SessionError> {
    let mut conn = self.redis.clone();
    let _: () = conn.del(session_key(&token.digest())).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_session_key_never_contains_the_raw_token() {
    let token = SessionToken::generate();
    let key = session_key(&token.digest());

    assert!(key.starts_with("session:"));
    assert!(!key.contains(token.as_str()));
  }
}
