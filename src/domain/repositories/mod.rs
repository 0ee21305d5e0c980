//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in `crate::infrastructure::persistence`.
//! Mock implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User lookup and login history
//!
//! # Testing
//!
//! See integration tests in `tests/repository_user.rs` for usage examples.

pub mod user_repository;

pub use user_repository::UserRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
