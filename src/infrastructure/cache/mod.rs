//! Page cache adapters keyed by request path

mod in_memory_page_cache;
mod redis_page_cache;

pub use in_memory_page_cache::InMemoryPageCache;
pub use redis_page_cache::RedisPageCache;
