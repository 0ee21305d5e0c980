//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, session store setup, and Axum server lifecycle.

use crate::application::services::TokenService;
use crate::config::Config;
use crate::domain::repositories::UserRepository;
use crate::infrastructure::persistence::PgUserRepository;
use crate::infrastructure::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis session store (or in-memory fallback)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    let sessions = connect_sessions(&config).await;

    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(Arc::new(pool)));
    let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_seconds);

    let state = AppState::new(users, sessions, tokens);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Connects the Redis session store, falling back to process memory when
/// Redis is not configured or unreachable.
async fn connect_sessions(config: &Config) -> Arc<dyn SessionStore> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Session store: in-memory (Redis not configured)");
        return Arc::new(MemorySessionStore::new(config.session_ttl_seconds));
    };

    match RedisSessionStore::connect(redis_url, config.session_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Session store: Redis");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("{}. Using in-memory session store.", e);
            Arc::new(MemorySessionStore::new(config.session_ttl_seconds))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
