//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Tables {
    /// Ordered by id so `find_all` is stable
    users: BTreeMap<UserId, User>,
    /// Index for username -> user ID lookup
    username_index: HashMap<String, UserId>,
    next_id: u64,
}

/// In-memory implementation of UserRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut tables = Tables::default();

        for user in users {
            tables.next_id = tables.next_id.max(user.id().value());
            tables
                .username_index
                .insert(user.username().to_string(), user.id());
            tables.users.insert(user.id(), user);
        }

        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;

        Ok(tables
            .username_index
            .get(username)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        // Uniqueness is checked under the write lock, so racing inserts
        // cannot both succeed
        if tables.username_index.contains_key(&user.username) {
            return Err(DomainError::conflict("user already exists"));
        }

        tables.next_id += 1;
        let id = UserId::new(tables.next_id)
            .map_err(|e| DomainError::storage(format!("Failed to assign user ID: {}", e)))?;

        let user = user.into_user(id);
        tables.username_index.insert(user.username().to_string(), id);
        tables.users.insert(id, user.clone());

        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let mut tables = self.tables.write().await;

        let removed = tables.users.remove(&id);

        if let Some(user) = &removed {
            tables.username_index.remove(user.username());
        }

        Ok(removed)
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }
}
