//! Core domain entities.
//!
//! Entities are plain data structures without business logic. Records that
//! are created through the repository have a separate input struct
//! (`NewUser`) next to the stored form (`User`).
//!
//! # Entity Types
//!
//! - [`User`] - A stored account with its bcrypt password hash
//! - [`LoginRecord`] - One successful login in a user's history
//! - [`Credentials`] - Email and plaintext password submitted at login
//! - [`Alert`] - User-facing outcome message with a severity level

pub mod alert;
pub mod credentials;
pub mod user;

pub use alert::{Alert, AlertLevel};
pub use credentials::Credentials;
pub use user::{LoginRecord, NewUser, User};
