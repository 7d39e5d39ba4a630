// ABOUTME: Database operations for personas (predefined and user-owned)
// ABOUTME: Handles creation with globally unique names and scoped listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona accessors
//!
//! Personas are either predefined (shared, no owner) or user-created. Names
//! are globally unique; personas are never updated or deleted once created.

use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::parse_uuid;
use crate::errors::{AppError, AppResult};

/// A chat persona with a display name and descriptive text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Unique identifier
    pub id: Uuid,
    /// Globally unique display name
    pub name: String,
    /// Free-text description of the persona's character
    pub description: String,
    /// Owning user; `None` for predefined/shared personas
    pub owner_id: Option<Uuid>,
    /// Whether this persona was seeded rather than user-created
    pub is_predefined: bool,
    /// Free-text training data (stored, not consulted by response generation)
    pub training_data: String,
}

/// Request to create a user-owned persona
#[derive(Debug, Clone)]
pub struct CreatePersonaRequest {
    /// Display name (must be globally unique)
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Free-text training data
    pub training_data: String,
}

/// Database accessor for personas
pub struct PersonasManager {
    pool: SqlitePool,
}

impl PersonasManager {
    /// Create a new manager over the given pool
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user-owned persona
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the name is already taken, or a
    /// database error for any other failure
    pub async fn create(
        &self,
        owner_id: Uuid,
        request: &CreatePersonaRequest,
    ) -> AppResult<Persona> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO personas (id, name, description, owner_id, is_predefined, training_data)
            VALUES ($1, $2, $3, $4, 0, $5)
            ",
        )
        .bind(id.to_string())
        .bind(&request.name)
        .bind(&request.description)
        .bind(owner_id.to_string())
        .bind(&request.training_data)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                AppError::conflict(format!("Persona name '{}' is already taken", request.name))
            } else {
                AppError::database(format!("Failed to create persona: {e}"))
            }
        })?;

        Ok(Persona {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            owner_id: Some(owner_id),
            is_predefined: false,
            training_data: request.training_data.clone(),
        })
    }

    /// Get a persona by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, persona_id: Uuid) -> AppResult<Option<Persona>> {
        let row = sqlx::query(
            r"
            SELECT id, name, description, owner_id, is_predefined, training_data
            FROM personas WHERE id = $1
            ",
        )
        .bind(persona_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get persona: {e}")))?;

        row.map(|r| persona_from_row(&r)).transpose()
    }

    /// List all predefined (shared) personas, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_predefined(&self) -> AppResult<Vec<Persona>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, owner_id, is_predefined, training_data
            FROM personas WHERE is_predefined = 1 ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list predefined personas: {e}")))?;

        rows.iter().map(persona_from_row).collect()
    }

    /// List personas owned by a user, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_for_user(&self, owner_id: Uuid) -> AppResult<Vec<Persona>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, owner_id, is_predefined, training_data
            FROM personas WHERE owner_id = $1 ORDER BY name
            ",
        )
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list personas: {e}")))?;

        rows.iter().map(persona_from_row).collect()
    }
}

fn persona_from_row(row: &SqliteRow) -> AppResult<Persona> {
    let id: String = row
        .try_get("id")
        .map_err(|e| AppError::database(format!("Failed to read persona row: {e}")))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| AppError::database(format!("Failed to read persona row: {e}")))?;
    let description: String = row
        .try_get("description")
        .map_err(|e| AppError::database(format!("Failed to read persona row: {e}")))?;
    let owner_id: Option<String> = row
        .try_get("owner_id")
        .map_err(|e| AppError::database(format!("Failed to read persona row: {e}")))?;
    let is_predefined: i64 = row
        .try_get("is_predefined")
        .map_err(|e| AppError::database(format!("Failed to read persona row: {e}")))?;
    let training_data: String = row
        .try_get("training_data")
        .map_err(|e| AppError::database(format!("Failed to read persona row: {e}")))?;

    Ok(Persona {
        id: parse_uuid(&id, "persona")?,
        name,
        description,
        owner_id: owner_id
            .map(|o| parse_uuid(&o, "persona owner"))
            .transpose()?,
        is_predefined: is_predefined != 0,
        training_data,
    })
}
