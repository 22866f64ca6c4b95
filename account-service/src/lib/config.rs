use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL URL; the in-memory store is used when absent
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_expiration_ms: i64,
    pub refresh_expiration_ms: i64,
}

impl JwtConfig {
    pub fn access_lifetime(&self) -> Duration {
        Duration::milliseconds(self.access_expiration_ms)
    }

    pub fn refresh_lifetime(&self) -> Duration {
        Duration::milliseconds(self.refresh_expiration_ms)
    }

    /// Both lifetimes must be positive and the refresh token must outlive
    /// the access token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_expiration_ms <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.access_expiration_ms must be positive, got {}",
                self.access_expiration_ms
            )));
        }

        if self.refresh_expiration_ms <= self.access_expiration_ms {
            return Err(ConfigError::Message(format!(
                "jwt.refresh_expiration_ms ({}) must be greater than jwt.access_expiration_ms ({})",
                self.refresh_expiration_ms, self.access_expiration_ms
            )));
        }

        Ok(())
    }
}

// The signing secret must never reach the logs
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_expiration_ms", &self.access_expiration_ms)
            .field("refresh_expiration_ms", &self.refresh_expiration_ms)
            .finish()
    }
}

/// Argon2id cost parameters
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}
