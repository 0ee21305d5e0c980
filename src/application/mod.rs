//! Application layer services implementing business logic.
//!
//! Services consume repository and session store traits and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::login_service::LoginService`] - Password login and token issuing
//! - [`services::token_service::TokenService`] - Session token signing and validation

pub mod services;
