//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Repository traits define contracts implemented by the infrastructure layer and
//! business logic lives in services (see [`crate::application::services`]).
//!
//! # Architecture
//!
//! - [`entities`] - Users, login history, credentials and alerts
//! - [`repositories`] - Data access trait definitions
//!
//! # Login Flow
//!
//! 1. HTTP handler receives [`entities::Credentials`]
//! 2. User record is fetched via [`repositories::UserRepository::find_by_email`]
//! 3. Password is checked against the stored bcrypt hash
//! 4. A session token is issued, stored, and the login recorded via
//!    [`repositories::UserRepository::update_login_history`]
//! 5. An [`entities::Alert`] describing the outcome is returned to the caller

pub mod entities;
pub mod repositories;
