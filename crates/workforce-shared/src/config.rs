//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_PORT, MEMORY_DATABASE_URL};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Single browser origin allowed by CORS.
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseSettings {
    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with(MEMORY_DATABASE_URL)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// Tokens never expire unless this is set.
    #[serde(default)]
    pub expiry_seconds: Option<i64>,
}

impl AppConfig {
    /// Defaults cover only non-secret values; `database.url`, `jwt.secret` and
    /// `app.allowed_origin` must come from files or the environment.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", DEFAULT_PORT)?
            .set_default("app.name", "workforce-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let loaded: AppConfig = config.try_deserialize()?;
        loaded.validate()
    }

    fn validate(self) -> Result<Self, AppError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::MissingSetting("jwt.secret"));
        }
        if self.database.url.trim().is_empty() {
            return Err(AppError::MissingSetting("database.url"));
        }
        if self.app.allowed_origin.trim().is_empty() {
            return Err(AppError::MissingSetting("app.allowed_origin"));
        }
        Ok(self)
    }
}
