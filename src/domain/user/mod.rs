//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including the stored entity, its public view, the request principal,
//! validation and the repository trait.

mod entity;
mod principal;
mod repository;
mod validation;

pub use entity::{NewUser, PublicUser, User, UserId};
pub use principal::Principal;
pub use repository::UserRepository;
pub use validation::{validate_email, validate_password, validate_username, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
