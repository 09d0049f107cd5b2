//! Configuration management for the Library Pulse server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which document store backs the collections
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreDriver {
    Mongodb,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub driver: StoreDriver,
    /// Full connection string; takes precedence over user/password/cluster_host
    pub uri: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub cluster_host: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub token_secret: String,
    pub token_ttl_minutes: i64,
    pub secure_cookie: bool,
    pub http_only_cookie: bool,
    /// Require a valid session cookie on book and borrow writes
    pub protect_writes: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorsConfig {
    /// Trusted origins. Empty, or a `*` entry, allows any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Nested keys use a double underscore: LIBRARY_PULSE__AUTH__TOKEN_SECRET
            .add_source(
                Environment::with_prefix("LIBRARY_PULSE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            // Variables used by the existing deployment
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("database.uri", env::var("MONGODB_URI").ok())?
            .set_override_option("database.user", env::var("DB_USER").ok())?
            .set_override_option("database.password", env::var("DB_PASS").ok())?
            .set_override_option("auth.token_secret", env::var("ACCESS_TOKEN_SECRET").ok())?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot start a server
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.token_secret (ACCESS_TOKEN_SECRET) must be set".to_string(),
            ));
        }
        if self.auth.token_ttl_minutes <= 0 {
            return Err(ConfigError::Message(
                "auth.token_ttl_minutes must be positive".to_string(),
            ));
        }
        if self.database.driver == StoreDriver::Mongodb {
            self.database.connection_uri()?;
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Connection string for the mongodb driver
    pub fn connection_uri(&self) -> Result<String, ConfigError> {
        if let Some(uri) = self.uri.as_deref().filter(|u| !u.is_empty()) {
            return Ok(uri.to_string());
        }
        match (self.user.as_deref(), self.password.as_deref()) {
            (Some(user), Some(password)) if !user.is_empty() => Ok(format!(
                "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                user, password, self.cluster_host
            )),
            _ => Err(ConfigError::Message(
                "database.uri (MONGODB_URI) or database.user/password (DB_USER/DB_PASS) must be set"
                    .to_string(),
            )),
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: StoreDriver::Mongodb,
            uri: None,
            user: None,
            password: None,
            cluster_host: "cluster0.bfscg0l.mongodb.net".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_minutes: 60,
            secure_cookie: false,
            http_only_cookie: false,
            protect_writes: true,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "https://library-pulse.web.app".to_string(),
                "https://library-pulse.firebaseapp.com".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.driver = StoreDriver::Memory;
        config.auth.token_secret = "secret".to_string();
        config
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let mut config = memory_config();
        config.auth.token_secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_driver_needs_no_credentials() {
        assert!(memory_config().validate().is_ok());
    }

    #[test]
    fn test_mongodb_uri_from_credentials() {
        let mut db = DatabaseConfig::default();
        db.user = Some("reader".to_string());
        db.password = Some("pw".to_string());
        assert_eq!(
            db.connection_uri().unwrap(),
            "mongodb+srv://reader:pw@cluster0.bfscg0l.mongodb.net/?retryWrites=true&w=majority"
        );
    }

    #[test]
    fn test_explicit_uri_wins() {
        let mut db = DatabaseConfig::default();
        db.uri = Some("mongodb://localhost:27017".to_string());
        db.user = Some("ignored".to_string());
        assert_eq!(db.connection_uri().unwrap(), "mongodb://localhost:27017");
    }

    #[test]
    fn test_mongodb_without_credentials_fails_validation() {
        let mut config = memory_config();
        config.database.driver = StoreDriver::Mongodb;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wildcard_origin() {
        let mut cors = CorsConfig::default();
        assert!(!cors.allows_any_origin());
        cors.allowed_origins.push("*".to_string());
        assert!(cors.allows_any_origin());
        assert!(CorsConfig { allowed_origins: vec![] }.allows_any_origin());
    }
}
