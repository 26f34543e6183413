//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// PostgreSQL connection settings
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool and wrap it
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Ensures the users table exists
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let Some(db_id) = to_db_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(db_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("user already exists")
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        row_to_user(&row)
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let Some(db_id) = to_db_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(db_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation())
}

/// BIGSERIAL ids never exceed `i64::MAX`; larger ids cannot exist
fn to_db_id(id: UserId) -> Option<i64> {
    i64::try_from(id.value()).ok()
}

fn from_db_id(id: i64) -> Result<UserId, DomainError> {
    u64::try_from(id)
        .ok()
        .and_then(|id| UserId::new(id).ok())
        .ok_or_else(|| DomainError::storage(format!("Invalid user ID in database: {}", id)))
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let read_error = |e: sqlx::Error| DomainError::storage(format!("Failed to read user row: {}", e));

    let id: i64 = row.try_get("id").map_err(read_error)?;
    let username: String = row.try_get("username").map_err(read_error)?;
    let email: Option<String> = row.try_get("email").map_err(read_error)?;
    let password_hash: String = row.try_get("password_hash").map_err(read_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read_error)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read_error)?;

    Ok(User::from_parts(
        from_db_id(id)?,
        username,
        email,
        password_hash,
        created_at,
        updated_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_conversion() {
        let id = UserId::new(42).unwrap();
        assert_eq!(to_db_id(id), Some(42));
        assert_eq!(from_db_id(42).unwrap(), id);
    }

    #[test]
    fn test_invalid_db_ids_rejected() {
        assert!(matches!(from_db_id(0), Err(DomainError::Storage { .. })));
        assert!(matches!(from_db_id(-5), Err(DomainError::Storage { .. })));
    }

    #[test]
    fn test_out_of_range_id() {
        let id = UserId::new(u64::MAX).unwrap();
        assert_eq!(to_db_id(id), None);
    }

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn test_config_defaults() {
        let config = PostgresConfig::new("postgres://localhost/users");
        assert_eq!(config.url, "postgres://localhost/users");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
    }
}
