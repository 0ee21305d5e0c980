//! In-process session store.

use super::service::{SessionResult, SessionStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// A session store backed by a process-local map.
///
/// Every entry expires after the configured TTL. Values are lost on restart
/// regardless of the `persist` flag.
///
/// # Use Cases
///
/// - Development environments without Redis
/// - Tests
/// - Non-persistent values of [`super::RedisSessionStore`]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Creates an empty store whose entries expire after `ttl_seconds`.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn store_value(&self, key: &str, value: &str, persist: bool) -> SessionResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, e| !e.is_expired(now));
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + self.ttl,
            },
        );

        debug!(key, persist, "Session value stored in memory");
        Ok(())
    }

    async fn get_value(&self, key: &str) -> SessionResult<Option<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.value.clone()))
    }

    async fn remove_value(&self, key: &str) -> SessionResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
