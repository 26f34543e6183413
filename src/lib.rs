//! User Management API
//!
//! Account registration, login with JWT session tokens, and guarded
//! account management over HTTP, backed by PostgreSQL or an in-memory store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::user::UserRepository;
use infrastructure::{
    auth::{AuthService, JwtService},
    user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService},
};
use tracing::{info, warn};

/// Create the application state with all services initialized
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    config.validate()?;

    let hasher = Arc::new(Argon2Hasher::with_config(config.password.into())?);
    let tokens = Arc::new(JwtService::new(config.auth.jwt_config())?);

    match config.database.postgres() {
        Some(postgres) => {
            info!("Using PostgreSQL user store");
            let repository = PostgresUserRepository::connect(&postgres).await?;
            repository.ensure_schema().await?;
            Ok(build_state(Arc::new(repository), hasher, tokens))
        }
        None => {
            warn!("No database configured; accounts are kept in memory and lost on restart");
            Ok(build_state(
                Arc::new(InMemoryUserRepository::new()),
                hasher,
                tokens,
            ))
        }
    }
}

fn build_state<R: UserRepository + 'static>(
    repository: Arc<R>,
    hasher: Arc<Argon2Hasher>,
    tokens: Arc<JwtService>,
) -> AppState {
    AppState::new(
        Arc::new(AuthService::new(repository.clone(), hasher, tokens)),
        Arc::new(UserService::new(repository)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_state_requires_secret() {
        let config = AppConfig::default();

        assert!(create_app_state_with_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_state() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "secret".to_string();

        let state = create_app_state_with_config(&config).await.unwrap();
        assert!(state.user_service.list_users().await.unwrap().is_empty());
    }
}
