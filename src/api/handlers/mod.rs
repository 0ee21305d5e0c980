//! HTTP request handlers for API endpoints.

pub mod health;
pub mod login;
pub mod session;

pub use health::health_handler;
pub use login::login_handler;
pub use session::session_handler;
