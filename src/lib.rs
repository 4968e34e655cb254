//! User Admin
//!
//! Server-rendered pages for managing user records:
//! - List, create, edit, update and delete users
//! - Creation-time validation with every violation reported at once
//! - Salted Argon2 password digests; plaintext is never stored
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::{AppState, RoutePaths, UserServiceTrait, Views};
use config::StorageBackend;
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserSchema, UserService,
};

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new(&config.hashing)?);
    let views = Arc::new(Views::new()?);
    let paths = RoutePaths::new(&config.server.mount_path);

    info!("Storage backend: {:?}", config.storage.backend);

    let user_service: Arc<dyn UserServiceTrait> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            hasher,
        )),
        StorageBackend::Postgres => {
            let database_url = config
                .storage
                .database_url
                .clone()
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .context("storage.database_url or DATABASE_URL is required for the postgres backend")?;

            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(config.storage.max_connections)
                .connect(&database_url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            info!("PostgreSQL connection established");

            let schema = UserSchema::new(config.storage.table.as_str())?;
            let repository = PostgresUserRepository::new(pool, schema);
            repository.ensure_table().await?;

            Arc::new(UserService::new(Arc::new(repository), hasher))
        }
    };

    Ok(AppState::new(user_service, views, paths))
}
