//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{LoginService, TokenService};
use crate::domain::repositories::UserRepository;
use crate::infrastructure::session::SessionStore;

/// Login service over trait-object backends, as held by [`AppState`].
pub type DynLoginService = LoginService<dyn UserRepository, dyn SessionStore>;

#[derive(Clone)]
pub struct AppState {
    pub login_service: Arc<DynLoginService>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Wires the login service over the given backends.
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        tokens: TokenService,
    ) -> Self {
        let login_service = Arc::new(LoginService::new(users.clone(), sessions.clone(), tokens));

        Self {
            login_service,
            users,
            sessions,
        }
    }
}
