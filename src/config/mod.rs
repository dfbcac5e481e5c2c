use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Secret used when `JWT_SECRET` is unset in development.
const DEVELOPMENT_JWT_SECRET: &str = "catalog-api-development-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing)]
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
    pub reset_on_startup: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_minutes: u64,
    pub cors_origins: Vec<String>,
    pub password_hash: PasswordHashConfig,
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides(&lookup);

        config.database.url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => config.security.jwt_secret = secret,
            _ if environment == Environment::Development => {
                tracing::warn!("JWT_SECRET not set, using the development signing key");
            }
            _ => return Err(ConfigError::Missing("JWT_SECRET")),
        }

        Ok(config)
    }

    fn with_env_overrides<F>(mut self, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(port) = lookup("CATALOG_API_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs = v.parse().unwrap_or(self.database.connection_timeout_secs);
        }
        if let Some(v) = lookup("DATABASE_RESET_ON_STARTUP") {
            self.database.reset_on_startup = v.parse().unwrap_or(self.database.reset_on_startup);
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_JWT_EXPIRY_MINUTES") {
            self.security.jwt_expiry_minutes = v.parse().unwrap_or(self.security.jwt_expiry_minutes);
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = lookup("PASSWORD_HASH_MEMORY_KIB") {
            self.security.password_hash.memory_kib = v.parse().unwrap_or(self.security.password_hash.memory_kib);
        }
        if let Some(v) = lookup("PASSWORD_HASH_ITERATIONS") {
            self.security.password_hash.iterations = v.parse().unwrap_or(self.security.password_hash.iterations);
        }
        if let Some(v) = lookup("PASSWORD_HASH_PARALLELISM") {
            self.security.password_hash.parallelism = v.parse().unwrap_or(self.security.password_hash.parallelism);
        }

        // API overrides
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connection_timeout_secs: 30,
                reset_on_startup: false,
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                jwt_expiry_minutes: 30,
                cors_origins: vec!["http://localhost:4200".to_string()],
                password_hash: PasswordHashConfig::default(),
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout_secs: 10,
                reset_on_startup: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_minutes: 30,
                cors_origins: vec!["https://staging.example.com".to_string()],
                password_hash: PasswordHashConfig::default(),
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 256 * 1024,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout_secs: 5,
                reset_on_startup: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_minutes: 30,
                cors_origins: vec!["https://app.example.com".to_string()],
                password_hash: PasswordHashConfig::default(),
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 64 * 1024,
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
