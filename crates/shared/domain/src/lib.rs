//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user aggregate, its request DTOs, and the credential codec
//! (password hashing and opaque ID generation).

pub mod constants;
pub mod error;
pub mod id;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use id::{generate_id, generate_id_with};
pub use password::Password;
pub use user::{CreateUser, UpdateUser, User, UserResponse};
