//! Session store adapters

mod in_memory_session_store;
mod redis_session_store;

pub use in_memory_session_store::InMemorySessionStore;
pub use redis_session_store::RedisSessionStore;
