//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Store capability for user accounts.
///
/// Implementations own their concurrency safety. A duplicate username on
/// `create` must surface as `DomainError::Conflict`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user, returning it with its assigned ID
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Delete a user, returning the pre-deletion snapshot if it existed
    async fn delete(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// List all users in store order
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
}
