//! User service for account management

use std::sync::Arc;
use tracing::info;

use crate::domain::user::{Principal, PublicUser, UserId, UserRepository};
use crate::domain::DomainError;

/// User service for listing, removing and looking up accounts
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List all accounts in store order
    pub async fn list_users(&self) -> Result<Vec<PublicUser>, DomainError> {
        let users = self.repository.find_all().await?;
        Ok(users.iter().map(PublicUser::from).collect())
    }

    /// Remove an account on behalf of `requester`.
    ///
    /// Self-deletion is refused before the target is looked up, so it wins
    /// over "user not found".
    pub async fn remove_user(
        &self,
        target_id: u64,
        requester: Principal,
    ) -> Result<PublicUser, DomainError> {
        if requester.user_id().value() == target_id {
            return Err(DomainError::bad_request("cannot delete current user"));
        }

        let not_found = || DomainError::bad_request("user not found");

        let target = UserId::new(target_id).map_err(|_| not_found())?;

        if self.repository.find_by_id(target).await?.is_none() {
            return Err(not_found());
        }

        // Another request may have removed it in between
        let removed = self
            .repository
            .delete(target)
            .await?
            .ok_or_else(not_found)?;

        info!(
            user_id = %target,
            removed_by = %requester.user_id(),
            "User removed"
        );

        Ok(removed.to_public())
    }

    /// Public view of the requester's own account
    pub async fn current_user(&self, principal: Principal) -> Result<PublicUser, DomainError> {
        self.repository
            .find_by_id(principal.user_id())
            .await?
            .map(|user| user.to_public())
            .ok_or_else(|| DomainError::bad_request("user not found"))
    }
}
