//! Key/value session storage for issued tokens.
//!
//! Provides a [`SessionStore`] trait with two implementations:
//! - [`RedisSessionStore`] - Redis-backed store for persistent values
//! - [`MemorySessionStore`] - Process-local store, used without Redis and in tests

mod memory_store;
mod redis_store;
mod service;

pub use memory_store::MemorySessionStore;
pub use redis_store::RedisSessionStore;
pub use service::{SessionError, SessionResult, SessionStore};

#[cfg(test)]
pub use service::MockSessionStore;
