//! Authentication service: registration, login and request identity

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::jwt::{IssuedToken, JwtClaims, TokenError, TokenService};
use crate::domain::user::{
    validate_email, validate_password, validate_username, NewUser, Principal, PublicUser,
    UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::user::PasswordHasher;

const MISSING_HEADER: &str = "authorization header is missing";
const INVALID_FORMAT: &str = "invalid token format";
const INVALID_OR_EXPIRED: &str = "invalid or expired token";
const INVALID_TOKEN: &str = "invalid token";
const ACCOUNT_GONE: &str = "user not found";

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

/// Request for a session token
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authentication service
#[derive(Debug)]
pub struct AuthService<R: UserRepository, H: PasswordHasher, T: TokenService> {
    repository: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R: UserRepository, H: PasswordHasher, T: TokenService> AuthService<R, H, T> {
    /// Create a new authentication service
    pub fn new(repository: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Register a new account
    pub async fn register(&self, request: RegisterRequest) -> Result<PublicUser, DomainError> {
        validate_username(&request.username)
            .map_err(|e| DomainError::bad_request(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::bad_request(e.to_string()))?;

        let email = request.email.filter(|email| !email.is_empty());
        if let Some(email) = &email {
            validate_email(email).map_err(|e| DomainError::bad_request(e.to_string()))?;
        }

        // Fast path only; the store's uniqueness constraint is authoritative
        if self
            .repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict("user already exists"));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let user = self
            .repository
            .create(NewUser::new(request.username, email, password_hash))
            .await?;

        info!(user_id = %user.id(), username = %user.username(), "User registered");

        Ok(user.to_public())
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, request: LoginRequest) -> Result<IssuedToken, DomainError> {
        if request.username.is_empty() || request.password.is_empty() {
            return Err(DomainError::bad_request("username and password are required"));
        }

        let user = self
            .repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| DomainError::bad_request("user not found"))?;

        if !self.hasher.verify(&request.password, user.password_hash())? {
            warn!(user_id = %user.id(), "Login failed: wrong password");
            return Err(DomainError::unauthorized("wrong password"));
        }

        let issued = self.tokens.issue(user.id(), user.username())?;

        info!(user_id = %user.id(), "User logged in");

        Ok(issued)
    }

    /// Reconcile validated claims with the current store
    pub async fn resolve(&self, claims: &JwtClaims) -> Result<Principal, DomainError> {
        let user = self.repository.find_by_id(claims.id).await?;

        match user {
            Some(user) if user.username() == claims.username => Ok(Principal::new(user.id())),
            _ => {
                warn!(user_id = %claims.id, "Token subject no longer exists");
                Err(DomainError::unauthorized(ACCOUNT_GONE))
            }
        }
    }

    /// Admit or reject a request given its raw `Authorization` header
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, DomainError> {
        let header = match authorization {
            Some(header) if !header.is_empty() => header,
            _ => return Err(DomainError::unauthorized(MISSING_HEADER)),
        };

        let token = bearer_token(header).ok_or_else(|| DomainError::unauthorized(INVALID_FORMAT))?;

        let claims = self.tokens.validate(token).map_err(|e| {
            warn!(reason = %e, "Rejected session token");
            match e {
                TokenError::InvalidClaims(_) => DomainError::unauthorized(INVALID_TOKEN),
                _ => DomainError::unauthorized(INVALID_OR_EXPIRED),
            }
        })?;

        debug!(user_id = %claims.id, "Session token validated");

        self.resolve(&claims).await
    }
}

/// Split `Bearer <token>`; exactly two space-separated parts are accepted
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}
