use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::auth::JwtConfig;
use crate::infrastructure::user::{Argon2Config, PostgresConfig};

/// Plain environment variable honoured when `auth.jwt_secret` is unset
const SECRET_ENV: &str = "SECRET";
/// Plain environment variable honoured when `database.url` is unset
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub password: PasswordConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Session token settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
}

/// Argon2 work factor
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// PostgreSQL settings; no URL means the in-memory store
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiration_hours: JwtConfig::DEFAULT_EXPIRATION_HOURS,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[hidden]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .finish()
    }
}

impl AuthConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(self.jwt_secret.clone(), self.jwt_expiration_hours)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let defaults = Argon2Config::default();
        Self {
            memory_kib: defaults.memory_kib,
            iterations: defaults.iterations,
            parallelism: defaults.parallelism,
        }
    }
}

impl From<PasswordConfig> for Argon2Config {
    fn from(config: PasswordConfig) -> Self {
        Self {
            memory_kib: config.memory_kib,
            iterations: config.iterations,
            parallelism: config.parallelism,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Postgres settings, if a database URL is configured
    pub fn postgres(&self) -> Option<PostgresConfig> {
        let url = self.url.as_deref().filter(|url| !url.trim().is_empty())?;

        Some(PostgresConfig {
            url: url.to_string(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
        })
    }
}

impl AppConfig {
    /// Load from `config/default`, `config/local` and `APP__*` variables,
    /// then apply the plain `SECRET` and `DATABASE_URL` fallbacks
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_env_fallbacks(|key| std::env::var(key).ok());

        Ok(app_config)
    }

    /// Fill unset values from plain environment variables
    pub fn apply_env_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.auth.jwt_secret.is_empty() {
            if let Some(secret) = lookup(SECRET_ENV) {
                self.auth.jwt_secret = secret;
            }
        }

        if self.database.url.is_none() {
            self.database.url = lookup(DATABASE_URL_ENV).filter(|url| !url.is_empty());
        }
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "JWT signing secret is not set (use APP__AUTH__JWT_SECRET or {})",
                SECRET_ENV
            )));
        }

        if self.auth.jwt_expiration_hours == 0 {
            return Err(DomainError::configuration(
                "auth.jwt_expiration_hours must be at least 1",
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(DomainError::configuration(
                "database.min_connections exceeds database.max_connections",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_json(json: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.auth.jwt_expiration_hours, 24);
        assert!(config.database.postgres().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_json(
            r#"{ "server": { "port": 9000 }, "logging": { "format": "json" }, "auth": { "jwt_secret": "s3cret" } }"#,
        );

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.auth.jwt_expiration_hours, 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let config = AppConfig::default();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_secret_fallback() {
        let mut config = AppConfig::default();
        config.apply_env_fallbacks(env(&[("SECRET", "from-env")]));

        assert_eq!(config.auth.jwt_secret, "from-env");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configured_secret_wins_over_fallback() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "configured".to_string();
        config.apply_env_fallbacks(env(&[("SECRET", "from-env")]));

        assert_eq!(config.auth.jwt_secret, "configured");
    }

    #[test]
    fn test_database_url_fallback() {
        let mut config = AppConfig::default();
        config.apply_env_fallbacks(env(&[("DATABASE_URL", "postgres://db/users")]));

        let postgres = config.database.postgres().unwrap();
        assert_eq!(postgres.url, "postgres://db/users");
        assert_eq!(postgres.max_connections, 10);
    }

    #[test]
    fn test_invalid_pool_bounds() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        config.database.min_connections = 20;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "do-not-print".to_string();

        assert!(!format!("{:?}", config).contains("do-not-print"));
    }
}
