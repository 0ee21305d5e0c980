#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

use login_service::application::services::TokenService;
use login_service::domain::entities::{LoginRecord, NewUser, User};
use login_service::domain::repositories::UserRepository;
use login_service::error::AppError;
use login_service::infrastructure::session::MemorySessionStore;
use login_service::state::AppState;
use login_service::utils::password;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_EMAIL: &str = "bob@example.com";
pub const TEST_PASSWORD: &str = "696k2iyi";

/// User repository kept in process memory.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    history: Mutex<Vec<LoginRecord>>,
    fail_ping: bool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose `ping` fails, as if the database were down.
    pub fn unreachable() -> Self {
        Self {
            fail_ping: true,
            ..Self::default()
        }
    }

    pub async fn history_len(&self, user_id: i64) -> usize {
        self.history
            .lock()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn update_login_history(&self, user_id: i64) -> Result<(), AppError> {
        let now = Utc::now();
        let mut users = self.users.lock().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user_id })))?;
        user.last_login_at = Some(now);

        let mut history = self.history.lock().await;
        let id = history.len() as i64 + 1;
        history.push(LoginRecord {
            id,
            user_id,
            logged_in_at: now,
        });

        Ok(())
    }

    async fn list_login_history(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<LoginRecord>, AppError> {
        Ok(self
            .history
            .lock()
            .await
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().await;

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_email_key" }),
            ));
        }

        let user = User {
            id: users.len() as i64 + 1,
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            created_at: Utc::now(),
            last_login_at: None,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail_ping {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<MemorySessionStore>,
    pub user: User,
}

/// Builds application state over in-memory backends with one seeded user
/// (`TEST_EMAIL` / `TEST_PASSWORD`).
pub async fn create_test_context() -> TestContext {
    create_test_context_with(InMemoryUserRepository::new()).await
}

pub async fn create_test_context_with(repo: InMemoryUserRepository) -> TestContext {
    let users = Arc::new(repo);
    let sessions = Arc::new(MemorySessionStore::new(3600));

    let hash = password::hash_password(TEST_PASSWORD, 4).unwrap();
    let user = users
        .create_user(NewUser::new(TEST_EMAIL, hash, Some("Bob".to_string())))
        .await
        .unwrap();

    let state = AppState::new(
        users.clone(),
        sessions.clone(),
        TokenService::new(TEST_SECRET, 3600),
    );

    TestContext {
        state,
        users,
        sessions,
        user,
    }
}
