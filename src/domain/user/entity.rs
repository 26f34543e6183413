//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::UserValidationError;

/// User identifier - a positive integer assigned by the store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(u64);

impl UserId {
    /// Create a new UserId. Zero is never issued by a store and is rejected.
    pub fn new(id: u64) -> Result<Self, UserValidationError> {
        if id == 0 {
            return Err(UserValidationError::ZeroId);
        }
        Ok(Self(id))
    }

    /// Get the inner numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Unique username for login
    username: String,
    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Rebuild a user from persisted fields
    pub fn from_parts(
        id: UserId,
        username: impl Into<String>,
        email: Option<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email,
            password_hash: password_hash.into(),
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Strip the credential material for an outward response
    pub fn to_public(&self) -> PublicUser {
        PublicUser::from(self)
    }
}

/// A user not yet persisted; the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: Option<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email,
            password_hash: password_hash.into(),
        }
    }

    /// Materialize with a store-assigned id, stamped with the current time
    pub fn into_user(self, id: UserId) -> User {
        let now = Utc::now();
        User::from_parts(id, self.username, self.email, self.password_hash, now, now)
    }
}

/// User view safe to return to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(id: u64, username: &str) -> User {
        NewUser::new(username, Some(format!("{}@example.com", username)), "hashed_password")
            .into_user(UserId::new(id).unwrap())
    }

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new(42).unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_user_id_zero_rejected() {
        assert_eq!(UserId::new(0), Err(UserValidationError::ZeroId));
        assert!(serde_json::from_str::<UserId>("0").is_err());
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user(1, "alice");

        assert_eq!(user.id().value(), 1);
        assert_eq!(user.username(), "alice");
        assert_eq!(user.email(), Some("alice@example.com"));
        assert_eq!(user.password_hash(), "hashed_password");
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user(1, "alice");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_public_view_strips_hash() {
        let user = create_test_user(7, "bob");
        let public = user.to_public();

        assert_eq!(public.id, user.id());
        assert_eq!(public.username, "bob");
        assert_eq!(public.created_at, user.created_at());

        let json = serde_json::to_value(&public).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("hashed_password"));
    }
}
