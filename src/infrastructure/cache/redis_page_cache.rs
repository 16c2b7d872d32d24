use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};

use crate::domain::invoice::{InvoiceError, PageCache};

// KEYS[1] generation key, KEYS[2] page key, ARGV: expected generation, body, ttl
const STORE_IF_CURRENT: &str = r#"
if (redis.call('GET', KEYS[1]) or '0') == ARGV[1] then
  redis.call('SET', KEYS[2], ARGV[2], 'EX', ARGV[3])
  return 1
end
return 0
"#;

/// Page cache stored in Redis under `page:{path}` with a fixed TTL.
///
/// The generation of each path lives under `page-gen:{path}`.
pub struct RedisPageCache {
  redis: ConnectionManager,
  ttl_seconds: u64,
  store_if_current: Script,
}

impl RedisPageCache {
  pub fn new(redis: ConnectionManager, ttl_seconds: u64) -> Self {
    Self {
      redis,
      ttl_seconds,
      store_if_current: Script::new(STORE_IF_CURRENT),
    }
  }
}

fn page_key(path: &str) -> String {
  format!("page:{}", path)
}

fn generation_key(path: &str) -> String {
  format!("page-gen:{}", path)
}

#[async_trait]
impl PageCache for RedisPageCache {
  async fn get(&self, path: &str) -> Result<Option<String>, InvoiceError> {
    let mut conn = self.redis.clone();
    let body: Option<String> = conn.get(page_key(path)).await?;
    Ok(body)
  }

  async fn generation(&self, path: &str) -> Result<u64, InvoiceError> {
    let mut conn = self.redis.clone();
    let generation: Option<u64> = conn.get(generation_key(path)).await?;
    Ok(generation.unwrap_or(0))
  }

  async fn put(&self, path: &str, body: String, generation: u64) -> Result<bool, InvoiceError> {
    let mut conn = self.redis.clone();
    let stored: i64 = self
      .store_if_current
      .key(generation_key(path))
      .key(page_key(path))
      .arg(generation)
      .arg(body)
      .arg(self.ttl_seconds)
      .invoke_async(&mut conn)
      .await?;
    Ok(stored == 1)
  }

  async fn revalidate(&self, path: &str) -> Result<(), InvoiceError> {
    let mut conn = self.redis.clone();
    let _: () = redis::pipe()
      .atomic()
      .incr(generation_key(path), 1)
      .ignore()
      .del(page_key(path))
      .ignore()
      .query_async(&mut conn)
      .await?;
    Ok(())
  }
}
