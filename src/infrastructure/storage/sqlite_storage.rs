//! SQLite storage engine for short links.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::utils::db_error::is_unique_violation_on_code;

/// Engine-level failures.
///
/// These never leave the persistence layer;
/// [`crate::infrastructure::persistence::SqliteLinkRepository`] maps them to
/// [`crate::domain::LinkError`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("short code already exists")]
    Unique,

    #[error("short code not found")]
    NotFound,

    #[error("no rows updated for short code")]
    NoRowsUpdated,

    #[error("short code is empty")]
    EmptyCode,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// How long to wait for a free connection.
    pub acquire_timeout: Duration,
    /// How long SQLite waits on a locked database before failing a statement.
    pub busy_timeout: Duration,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    code: String,
    original_url: String,
    visit_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(
            row.id,
            row.code,
            row.original_url,
            row.visit_count,
            row.created_at,
            row.updated_at,
        )
    }
}

/// Durable keyed store with a unique `code` column.
///
/// All mutations are single SQL statements, so concurrent callers sharing one
/// pool need no application-level locking: uniqueness is decided by the
/// `UNIQUE` constraint on insert and increments are `visit_count + 1` updates.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Opens (creating if missing) the database at `database_url` and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the URL is invalid or the
    /// connection fails, [`StorageError::Migration`] if the schema cannot be
    /// applied.
    pub async fn connect(
        database_url: &str,
        options: &StorageOptions,
    ) -> Result<Self, StorageError> {
        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(options.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect_options)
            .await?;

        Self::migrate(&pool).await?;
        tracing::debug!("Database schema is up to date");

        Ok(Self { pool })
    }

    /// Wraps an existing pool whose schema is already migrated.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations to `pool`.
    pub async fn migrate(pool: &SqlitePool) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        Ok(())
    }

    /// Inserts a new link with `visit_count = 0` and both timestamps set to now.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unique`] if the insert violates the `code`
    /// uniqueness constraint.
    pub async fn save(&self, new_link: &NewShortLink) -> Result<ShortLink, StorageError> {
        if new_link.code.is_empty() {
            return Err(StorageError::EmptyCode);
        }

        let now = Utc::now();

        let result = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (code, original_url, visit_count, created_at, updated_at)
            VALUES (?, ?, 0, ?, ?)
            RETURNING id, code, original_url, visit_count, created_at, updated_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.original_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation_on_code(&e) => Err(StorageError::Unique),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Point lookup by code.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no row has this code.
    pub async fn find_by_code(&self, code: &str) -> Result<ShortLink, StorageError> {
        if code.is_empty() {
            return Err(StorageError::EmptyCode);
        }

        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, code, original_url, visit_count, created_at, updated_at
            FROM short_links
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ShortLink::from).ok_or(StorageError::NotFound)
    }

    /// Increments the visit counter and refreshes `updated_at` in one statement.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoRowsUpdated`] if no row has this code.
    pub async fn increment_visits(&self, code: &str) -> Result<(), StorageError> {
        if code.is_empty() {
            return Err(StorageError::EmptyCode);
        }

        let result = sqlx::query(
            r#"
            UPDATE short_links
            SET visit_count = visit_count + 1, updated_at = ?
            WHERE code = ?
            "#,
        )
        .bind(Utc::now())
        .bind(code)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NoRowsUpdated);
        }

        Ok(())
    }

    /// Checks that the database answers a trivial query.
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes every pooled connection. Later calls are no-ops.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        self.pool.close().await;
    }

    /// Returns true once [`Self::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
