//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{Principal, PublicUser, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::{
    AuthService, IssuedToken, LoginRequest, RegisterRequest, TokenService,
};
use crate::infrastructure::user::{PasswordHasher, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<dyn AuthServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }
}

/// Trait for registration, login and request authentication
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<PublicUser, DomainError>;
    async fn login(&self, request: LoginRequest) -> Result<IssuedToken, DomainError>;
    async fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, DomainError>;
}

/// Trait for account management operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn list_users(&self) -> Result<Vec<PublicUser>, DomainError>;
    async fn remove_user(
        &self,
        target_id: u64,
        requester: Principal,
    ) -> Result<PublicUser, DomainError>;
    async fn current_user(&self, principal: Principal) -> Result<PublicUser, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H, T> AuthServiceTrait for AuthService<R, H, T>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenService + 'static,
{
    async fn register(&self, request: RegisterRequest) -> Result<PublicUser, DomainError> {
        AuthService::register(self, request).await
    }

    async fn login(&self, request: LoginRequest) -> Result<IssuedToken, DomainError> {
        AuthService::login(self, request).await
    }

    async fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, DomainError> {
        AuthService::authenticate(self, authorization).await
    }
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn list_users(&self) -> Result<Vec<PublicUser>, DomainError> {
        UserService::list_users(self).await
    }

    async fn remove_user(
        &self,
        target_id: u64,
        requester: Principal,
    ) -> Result<PublicUser, DomainError> {
        UserService::remove_user(self, target_id, requester).await
    }

    async fn current_user(&self, principal: Principal) -> Result<PublicUser, DomainError> {
        UserService::current_user(self, principal).await
    }
}

/// In-memory state with a cheap hasher for handler tests
#[cfg(test)]
pub(crate) fn test_state(secret: &str) -> AppState {
    use crate::infrastructure::auth::{JwtConfig, JwtService};
    use crate::infrastructure::user::{fast_hasher, InMemoryUserRepository};

    let repository = Arc::new(InMemoryUserRepository::new());
    let tokens = Arc::new(JwtService::new(JwtConfig::new(secret, 24)).unwrap());

    AppState::new(
        Arc::new(AuthService::new(
            repository.clone(),
            Arc::new(fast_hasher()),
            tokens,
        )),
        Arc::new(UserService::new(repository)),
    )
}
