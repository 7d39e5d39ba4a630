// ABOUTME: Database operations for user accounts and one-time authentication codes
// ABOUTME: Handles contact-based lookup, user creation, and single-use OTP verification
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User and one-time code accessors

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Otp, User};

/// Database accessor for users and their one-time codes
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new manager over the given pool
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT id, email, phone, created_at FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    /// Find a user by either contact field
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_by_contact(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, phone, created_at FROM users
            WHERE (email IS NOT NULL AND email = $1)
               OR (phone IS NOT NULL AND phone = $2)
            ",
        )
        .bind(email)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up user: {e}")))?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    /// Create a user with the given contacts
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(&self, email: Option<&str>, phone: Option<&str>) -> AppResult<User> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query("INSERT INTO users (id, email, phone, created_at) VALUES ($1, $2, $3, $4)")
            .bind(id.to_string())
            .bind(email)
            .bind(phone)
            .bind(now.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        Ok(User {
            id,
            email: email.map(ToOwned::to_owned),
            phone: phone.map(ToOwned::to_owned),
            created_at: now,
        })
    }

    /// Store a freshly issued one-time code
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_otp(
        &self,
        user_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Otp> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO otps (id, user_id, code, expires_at, verified)
            VALUES ($1, $2, $3, $4, 0)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(code)
        .bind(expires_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store OTP: {e}")))?;

        Ok(Otp {
            id,
            user_id,
            code: code.to_owned(),
            expires_at,
            verified: false,
        })
    }

    /// Verify a one-time code for a user, consuming it on success
    ///
    /// Returns `true` only for an unverified, unexpired code; a consumed or
    /// expired code always returns `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn verify_otp(&self, user_id: Uuid, code: &str) -> AppResult<bool> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, code, expires_at, verified FROM otps
            WHERE user_id = $1 AND code = $2 AND verified = 0
            ",
        )
        .bind(user_id.to_string())
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up OTP: {e}")))?;

        let Some(row) = row else {
            return Ok(false);
        };

        let otp = otp_from_row(&row)?;
        if otp.is_expired(Utc::now()) {
            return Ok(false);
        }

        sqlx::query("UPDATE otps SET verified = 1 WHERE id = $1")
            .bind(otp.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to consume OTP: {e}")))?;

        Ok(true)
    }
}

fn user_from_row(row: &SqliteRow) -> AppResult<User> {
    let id: String = row
        .try_get("id")
        .map_err(|e| AppError::database(format!("Failed to read user row: {e}")))?;
    let email: Option<String> = row
        .try_get("email")
        .map_err(|e| AppError::database(format!("Failed to read user row: {e}")))?;
    let phone: Option<String> = row
        .try_get("phone")
        .map_err(|e| AppError::database(format!("Failed to read user row: {e}")))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| AppError::database(format!("Failed to read user row: {e}")))?;

    Ok(User {
        id: parse_uuid(&id, "user")?,
        email,
        phone,
        created_at: parse_timestamp(&created_at, "created_at")?,
    })
}

fn otp_from_row(row: &SqliteRow) -> AppResult<Otp> {
    let id: String = row
        .try_get("id")
        .map_err(|e| AppError::database(format!("Failed to read OTP row: {e}")))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| AppError::database(format!("Failed to read OTP row: {e}")))?;
    let code: String = row
        .try_get("code")
        .map_err(|e| AppError::database(format!("Failed to read OTP row: {e}")))?;
    let expires_at: String = row
        .try_get("expires_at")
        .map_err(|e| AppError::database(format!("Failed to read OTP row: {e}")))?;
    let verified: i64 = row
        .try_get("verified")
        .map_err(|e| AppError::database(format!("Failed to read OTP row: {e}")))?;

    Ok(Otp {
        id: parse_uuid(&id, "otp")?,
        user_id: parse_uuid(&user_id, "otp user")?,
        code,
        expires_at: parse_timestamp(&expires_at, "expires_at")?,
        verified: verified != 0,
    })
}
