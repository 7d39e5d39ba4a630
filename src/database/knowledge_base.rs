// ABOUTME: Database operations for per-user knowledge-base question/answer entries
// ABOUTME: Handles CRUD with strict owner scoping and update-timestamp refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base entry accessors
//!
//! Entries are scoped strictly to their owning user; no operation here can
//! reach across users. Listing order is `created_at, id` ascending so the
//! response generator's first-match-wins scan is deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};

/// A knowledge-base question/answer pair owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Question text matched against chat input
    pub question: String,
    /// Stored answer returned verbatim on a match
    pub answer: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, refreshed on every update
    pub updated_at: DateTime<Utc>,
}

/// Database accessor for knowledge-base entries
pub struct KnowledgeBaseManager {
    pool: SqlitePool,
}

impl KnowledgeBaseManager {
    /// Create a new manager over the given pool
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an entry for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(
        &self,
        user_id: Uuid,
        question: &str,
        answer: &str,
    ) -> AppResult<KnowledgeEntry> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO knowledge_entries (id, user_id, question, answer, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(question)
        .bind(answer)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create knowledge entry: {e}")))?;

        Ok(KnowledgeEntry {
            id,
            user_id,
            question: question.to_owned(),
            answer: answer.to_owned(),
            created_at: now,
            updated_at: now,
        })
    }

    /// List a user's entries in stable creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<KnowledgeEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, question, answer, created_at, updated_at
            FROM knowledge_entries
            WHERE user_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list knowledge entries: {e}")))?;

        rows.iter().map(entry_from_row).collect()
    }

    /// Update an entry owned by the given user, refreshing `updated_at`
    ///
    /// Returns `None` when no entry with that id belongs to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update(
        &self,
        entry_id: Uuid,
        user_id: Uuid,
        question: &str,
        answer: &str,
    ) -> AppResult<Option<KnowledgeEntry>> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            UPDATE knowledge_entries
            SET question = $1, answer = $2, updated_at = $3
            WHERE id = $4 AND user_id = $5
            ",
        )
        .bind(question)
        .bind(answer)
        .bind(now.to_rfc3339())
        .bind(entry_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update knowledge entry: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(entry_id, user_id).await
    }

    /// Delete an entry owned by the given user
    ///
    /// Returns `true` when a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, entry_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM knowledge_entries WHERE id = $1 AND user_id = $2")
            .bind(entry_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete knowledge entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a single entry owned by the given user
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, entry_id: Uuid, user_id: Uuid) -> AppResult<Option<KnowledgeEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, question, answer, created_at, updated_at
            FROM knowledge_entries
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(entry_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get knowledge entry: {e}")))?;

        row.map(|r| entry_from_row(&r)).transpose()
    }
}

fn entry_from_row(row: &SqliteRow) -> AppResult<KnowledgeEntry> {
    let id: String = row
        .try_get("id")
        .map_err(|e| AppError::database(format!("Failed to read knowledge entry row: {e}")))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| AppError::database(format!("Failed to read knowledge entry row: {e}")))?;
    let question: String = row
        .try_get("question")
        .map_err(|e| AppError::database(format!("Failed to read knowledge entry row: {e}")))?;
    let answer: String = row
        .try_get("answer")
        .map_err(|e| AppError::database(format!("Failed to read knowledge entry row: {e}")))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| AppError::database(format!("Failed to read knowledge entry row: {e}")))?;
    let updated_at: String = row
        .try_get("updated_at")
        .map_err(|e| AppError::database(format!("Failed to read knowledge entry row: {e}")))?;

    Ok(KnowledgeEntry {
        id: parse_uuid(&id, "knowledge entry")?,
        user_id: parse_uuid(&user_id, "knowledge entry user")?,
        question,
        answer,
        created_at: parse_timestamp(&created_at, "created_at")?,
        updated_at: parse_timestamp(&updated_at, "updated_at")?,
    })
}
