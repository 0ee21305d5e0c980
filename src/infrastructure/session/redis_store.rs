//! Redis-backed session store.

use super::memory_store::MemorySessionStore;
use super::service::{SessionError, SessionResult, SessionStore};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Session store writing persistent values to Redis.
///
/// Values stored with `persist = true` are written with `SET EX` so they
/// survive a restart of this process and expire after the session TTL.
/// Values stored with `persist = false` stay in an embedded
/// [`MemorySessionStore`] for the lifetime of the process.
pub struct RedisSessionStore {
    client: ConnectionManager,
    ttl_seconds: u64,
    key_prefix: String,
    ephemeral: MemorySessionStore,
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl_seconds` - Lifetime of stored values; controlled via `SESSION_TTL_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectionError`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> SessionResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            SessionError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            SessionError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| SessionError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis session store");

        Ok(Self {
            client: manager,
            ttl_seconds,
            key_prefix: "session:".to_string(),
            ephemeral: MemorySessionStore::new(ttl_seconds),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn store_value(&self, key: &str, value: &str, persist: bool) -> SessionResult<()> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        // A key lives in exactly one tier: Redis or `ephemeral`.
        if !persist {
            conn.del::<_, i32>(&redis_key)
                .await
                .map_err(|e| SessionError::OperationError(format!("DEL {}: {}", redis_key, e)))?;

            return self.ephemeral.store_value(key, value, false).await;
        }

        self.ephemeral.remove_value(key).await?;

        conn.set_ex::<_, _, ()>(&redis_key, value, self.ttl_seconds)
            .await
            .map_err(|e| SessionError::OperationError(format!("SET {}: {}", redis_key, e)))?;

        debug!("Session SET: {} (TTL: {}s)", redis_key, self.ttl_seconds);
        Ok(())
    }

    async fn get_value(&self, key: &str) -> SessionResult<Option<String>> {
        if let Some(value) = self.ephemeral.get_value(key).await? {
            return Ok(Some(value));
        }

        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(&redis_key)
            .await
            .map_err(|e| SessionError::OperationError(format!("GET {}: {}", redis_key, e)))
    }

    async fn remove_value(&self, key: &str) -> SessionResult<()> {
        self.ephemeral.remove_value(key).await?;

        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        conn.del::<_, i32>(&redis_key)
            .await
            .map_err(|e| SessionError::OperationError(format!("DEL {}: {}", redis_key, e)))?;

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
