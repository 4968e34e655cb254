use std::path::Path;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub hashing: HashingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path the user pages are mounted under; redirects after writes target it
    pub mount_path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where user records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    /// Table holding user records (postgres backend)
    pub table: String,
    pub max_connections: u32,
}

/// Argon2 work parameters.
///
/// `time_cost` is the work factor: the number of passes over memory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    pub time_cost: u32,
    pub memory_kib: u32,
    pub parallelism: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            mount_path: "/users".to_string(),
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

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: None,
            table: "users".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            time_cost: 10,
            memory_kib: 4096,
            parallelism: 1,
        }
    }
}

impl AppConfig {
    /// Load configuration from `config/default`, `config/local`, an optional
    /// extra file and finally `APP__*` environment variables.
    pub fn load(extra_file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn from_toml(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.mount_path, "/users");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.table, "users");
        assert_eq!(config.hashing.time_cost, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 3000

            [storage]
            backend = "postgres"
            database_url = "postgres://localhost/users"
            "#,
        );

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(
            config.storage.database_url.as_deref(),
            Some("postgres://localhost/users")
        );
        assert_eq!(config.hashing.memory_kib, 4096);
    }

    #[test]
    fn test_log_format_parsing() {
        let config = from_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"
            "#,
        );

        assert_eq!(config.logging.level, "debug");
        assert!(matches!(config.logging.format, LogFormat::Json));
    }
}
