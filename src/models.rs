// ABOUTME: Common data models for user accounts and one-time authentication codes
// ABOUTME: Plain records shared between the auth layer, database accessors, and routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user identified by email and/or phone
///
/// At least one contact field is always present; both are unique across
/// users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Email address, if registered with one
    pub email: Option<String>,
    /// Phone number, if registered with one
    pub phone: Option<String>,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Best-effort human-readable contact for logging
    #[must_use]
    pub fn contact(&self) -> &str {
        self.email
            .as_deref()
            .or(self.phone.as_deref())
            .unwrap_or("<no contact>")
    }
}

/// A one-time authentication code issued to a user
///
/// Codes are single-use: verification flips `verified`, after which the code
/// never authenticates again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Otp {
    /// Unique identifier
    pub id: Uuid,
    /// User this code was issued to
    pub user_id: Uuid,
    /// The 6-digit code
    pub code: String,
    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
    /// Whether the code has been consumed
    pub verified: bool,
}

impl Otp {
    /// Whether the code has passed its expiry
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_user_contact_prefers_email() {
        let user = User {
            id: Uuid::new_v4(),
            email: Some("a@example.com".to_owned()),
            phone: Some("+15551234567".to_owned()),
            created_at: Utc::now(),
        };
        assert_eq!(user.contact(), "a@example.com");
    }

    #[test]
    fn test_otp_expiry() {
        let now = Utc::now();
        let otp = Otp {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            code: "123456".to_owned(),
            expires_at: now - Duration::minutes(1),
            verified: false,
        };
        assert!(otp.is_expired(now));
        assert!(!otp.is_expired(now - Duration::minutes(2)));
    }
}
