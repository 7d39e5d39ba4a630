// ABOUTME: Database management for users, one-time codes, personas, and knowledge entries
// ABOUTME: Owns the SQLite pool, schema migration, and predefined persona seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! This module provides `SQLite` persistence for the aipersonas backend. The
//! [`Database`] wrapper owns the connection pool and runs migrations at
//! construction; per-domain manager structs expose the actual CRUD
//! operations. All mutation is per-statement atomic; the core response
//! generation layer only ever reads.

/// Knowledge-base entry accessors
pub mod knowledge_base;
/// Persona accessors
pub mod personas;
/// User and one-time code accessors
pub mod users;

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;

use crate::errors::{AppError, AppResult};
use knowledge_base::KnowledgeBaseManager;
use personas::PersonasManager;
use users::UsersManager;

/// Predefined personas seeded at migration time
///
/// (name, description) pairs; training data for predefined personas is
/// intentionally empty.
const PREDEFINED_PERSONAS: &[(&str, &str)] = &[
    (
        "Sage",
        "A calm, thoughtful guide who weighs every side of a question.",
    ),
    (
        "Scholar",
        "A precise academic voice that cites concepts and definitions.",
    ),
    (
        "Companion",
        "A friendly conversationalist focused on encouragement.",
    ),
];

/// Database manager owning the `SQLite` pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or any migration statement fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options =
            if database_url.starts_with("sqlite:") && !database_url.contains(":memory:") {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_owned()
            };

        // In-memory databases are per-connection; a pool with more than one
        // connection would see a different empty database on each checkout.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new().max_connections(1)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect(&connection_options).await?;

        let db = Self { pool };

        db.migrate().await?;
        db.seed_predefined_personas().await?;

        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a migration statement fails
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE,
                phone TEXT UNIQUE,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS otps (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                code TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                verified INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_otps_user ON otps(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS personas (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                owner_id TEXT REFERENCES users(id),
                is_predefined INTEGER NOT NULL DEFAULT 0,
                training_data TEXT NOT NULL DEFAULT ''
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_personas_owner ON personas(owner_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS knowledge_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_knowledge_entries_user ON knowledge_entries(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Seed shared predefined personas, skipping names that already exist
    async fn seed_predefined_personas(&self) -> Result<()> {
        let mut seeded = 0_u32;
        for (name, description) in PREDEFINED_PERSONAS {
            let result = sqlx::query(
                r"
                INSERT OR IGNORE INTO personas (id, name, description, owner_id, is_predefined, training_data)
                VALUES ($1, $2, $3, NULL, 1, '')
                ",
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(name)
            .bind(description)
            .execute(&self.pool)
            .await?;
            seeded += u32::try_from(result.rows_affected()).unwrap_or(0);
        }
        if seeded > 0 {
            info!("Seeded {seeded} predefined personas");
        }
        Ok(())
    }

    /// Access the underlying pool
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// User and one-time code accessor
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Persona accessor
    #[must_use]
    pub fn personas(&self) -> PersonasManager {
        PersonasManager::new(self.pool.clone())
    }

    /// Knowledge-base accessor
    #[must_use]
    pub fn knowledge_base(&self) -> KnowledgeBaseManager {
        KnowledgeBaseManager::new(self.pool.clone())
    }
}

/// Parse an RFC 3339 timestamp stored as TEXT
pub(crate) fn parse_timestamp(raw: &str, field: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid {field} timestamp: {e}")))
}

/// Parse a uuid stored as TEXT
pub(crate) fn parse_uuid(raw: &str, field: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw).map_err(|e| AppError::database(format!("Invalid {field} id: {e}")))
}
