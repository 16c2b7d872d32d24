use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::domain::invoice::{InvoiceError, PageCache};

struct CachedPage {
  body: String,
  expires_at: Instant,
}

#[derive(Default)]
struct PathEntry {
  generation: u64,
  page: Option<CachedPage>,
}

/// Process-local page cache used when Redis is disabled and in tests
pub struct InMemoryPageCache {
  entries: RwLock<HashMap<String, PathEntry>>,
  ttl: Duration,
}

impl InMemoryPageCache {
  pub fn new(ttl_seconds: u64) -> Self {
    Self {
      entries: RwLock::new(HashMap::new()),
      ttl: Duration::from_secs(ttl_seconds),
    }
  }
}

#[async_trait]
impl PageCache for InMemoryPageCache {
  async fn get(&self, path: &str) -> Result<Option<String>, InvoiceError> {
    let entries = self
      .entries
      .read()
      .map_err(|e| InvoiceError::Cache(e.to_string()))?;
    let now = Instant::now();

    Ok(
      entries
        .get(path)
        .and_then(|entry| entry.page.as_ref())
        .filter(|page| page.expires_at > now)
        .map(|page| page.body.clone()),
    )
  }

  async fn generation(&self, path: &str) -> Result<u64, InvoiceError> {
    let entries = self
      .entries
      .read()
      .map_err(|e| InvoiceError::Cache(e.to_string()))?;
    Ok(entries.get(path).map_or(0, |entry| entry.generation))
  }

  async fn put(&self, path: &str, body: String, generation: u64) -> Result<bool, InvoiceError> {
    let mut entries = self
      .entries
      .write()
      .map_err(|e| InvoiceError::Cache(e.to_string()))?;
    let entry = entries.entry(path.to_string()).or_default();

    if entry.generation != generation {
      return Ok(false);
    }

    entry.page = Some(CachedPage {
      body,
      expires_at: Instant::now() + self.ttl,
    });
    Ok(true)
  }

  async fn revalidate(&self, path: &str) -> Result<(), InvoiceError> {
    let mut entries = self
      .entries
      .write()
      .map_err(|e| InvoiceError::Cache(e.to_string()))?;
    let entry = entries.entry(path.to_string()).or_default();
    entry.generation = entry.generation.wrapping_add(1);
    entry.page = None;
    Ok(())
  }
}
