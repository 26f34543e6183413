//! User infrastructure module
//!
//! This module provides password hashing with Argon2, the in-memory and
//! PostgreSQL repositories, and the account management service.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{Argon2Config, Argon2Hasher, PasswordHasher};
pub use postgres_repository::{PostgresConfig, PostgresUserRepository};
pub use repository::InMemoryUserRepository;
pub use service::UserService;

#[cfg(test)]
pub(crate) use password::fast_hasher;
