//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::domain::user::{NewUser, PasswordDigest, User, UserId, UserPatch, UserRepository};
use crate::domain::DomainError;

static TABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("valid table name pattern"));

const COLUMNS: &str = "id, name, email, password, created_at, updated_at";

/// Table layout for persisted users.
///
/// Built once at startup and handed to the repository; all statements are
/// rendered against it up front.
#[derive(Debug, Clone)]
pub struct UserSchema {
    table: String,
}

impl UserSchema {
    /// Describe a user table. The name must be a plain SQL identifier.
    pub fn new(table: impl Into<String>) -> Result<Self, DomainError> {
        let table = table.into();

        if !TABLE_NAME.is_match(&table) {
            return Err(DomainError::configuration(format!(
                "Invalid user table name '{}'",
                table
            )));
        }

        Ok(Self { table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn create_table_sql(&self) -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                password TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
            table = self.table
        )
    }

    fn statements(&self) -> Statements {
        let table = &self.table;

        Statements {
            list: format!("SELECT {COLUMNS} FROM {table} ORDER BY created_at"),
            count: format!("SELECT COUNT(*) FROM {table}"),
            get: format!("SELECT {COLUMNS} FROM {table} WHERE id = $1"),
            insert: format!(
                "INSERT INTO {table} ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
            ),
            update: format!(
                "UPDATE {table} SET name = COALESCE($2, name), email = COALESCE($3, email), \
                 password = COALESCE($4, password), updated_at = $5 WHERE id = $1"
            ),
            delete: format!("DELETE FROM {table} WHERE id = $1"),
        }
    }
}

impl Default for UserSchema {
    fn default() -> Self {
        Self {
            table: "users".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Statements {
    list: String,
    count: String,
    get: String,
    insert: String,
    update: String,
    delete: String,
}

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
    schema: UserSchema,
    statements: Statements,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool and table layout
    pub fn new(pool: PgPool, schema: UserSchema) -> Self {
        let statements = schema.statements();

        Self {
            pool,
            schema,
            statements,
        }
    }

    /// Create the user table if it does not exist yet
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(&self.schema.create_table_sql())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create user table: {}", e)))?;

        info!(table = %self.schema.table(), "User table ready");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&self.statements.list)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar(&self.statements.count)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        usize::try_from(count)
            .map_err(|e| DomainError::storage(format!("Invalid user count {}: {}", count, e)))
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&self.statements.get)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let user = User::create(UserId::generate(), user);

        sqlx::query(&self.statements.insert)
            .bind(user.id().as_uuid())
            .bind(user.name())
            .bind(user.email())
            .bind(user.password().as_str())
            .bind(user.created_at())
            .bind(user.updated_at())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create user: {}", e)))?;

        Ok(user)
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<(), DomainError> {
        let result = sqlx::query(&self.statements.update)
            .bind(id.as_uuid())
            .bind(patch.name.as_deref())
            .bind(patch.email.as_deref())
            .bind(patch.password.as_ref().map(PasswordDigest::as_str))
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query(&self.statements.delete)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let column_error = |e: sqlx::Error| DomainError::storage(format!("Invalid user row: {}", e));

    let id: Uuid = row.try_get("id").map_err(column_error)?;
    let name: String = row.try_get("name").map_err(column_error)?;
    let email: String = row.try_get("email").map_err(column_error)?;
    let password: String = row.try_get("password").map_err(column_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column_error)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(column_error)?;

    Ok(User::restore(
        UserId::from(id),
        name,
        email,
        PasswordDigest::new(password),
        created_at,
        updated_at,
    ))
}
