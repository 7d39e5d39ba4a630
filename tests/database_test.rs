// ABOUTME: Integration tests for database setup, migration, and persona seeding
// ABOUTME: Tests file-backed creation, idempotent migrations, and manager behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::create_test_database;

use aipersonas::database::personas::CreatePersonaRequest;
use aipersonas::database::Database;
use chrono::{Duration, Utc};

#[tokio::test]
async fn test_file_database_is_created_on_demand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let url = format!("sqlite:{}", path.display());

    let database = Database::new(&url).await.unwrap();
    assert!(path.exists());

    let predefined = database.personas().list_predefined().await.unwrap();
    assert_eq!(predefined.len(), 3);
}

#[tokio::test]
async fn test_migrations_and_seeding_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let url = format!("sqlite:{}", path.display());

    {
        let database = Database::new(&url).await.unwrap();
        database
            .users()
            .create(Some("keep@example.com"), None)
            .await
            .unwrap();
    }

    // Reopening runs migrations and seeding again; nothing duplicates
    let database = Database::new(&url).await.unwrap();
    let predefined = database.personas().list_predefined().await.unwrap();
    assert_eq!(predefined.len(), 3);

    let user = database
        .users()
        .find_by_contact(Some("keep@example.com"), None)
        .await
        .unwrap();
    assert!(user.is_some());
}

#[tokio::test]
async fn test_predefined_personas_have_no_owner() {
    let database = create_test_database().await.unwrap();

    let predefined = database.personas().list_predefined().await.unwrap();
    assert!(predefined.iter().all(|p| p.owner_id.is_none()));
    assert!(predefined.iter().all(|p| p.is_predefined));

    // Ordered by name
    let names: Vec<&str> = predefined.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Companion", "Sage", "Scholar"]);
}

#[tokio::test]
async fn test_persona_get_roundtrip() {
    let database = create_test_database().await.unwrap();
    let user = database
        .users()
        .create(Some("owner@example.com"), None)
        .await
        .unwrap();

    let created = database
        .personas()
        .create(
            user.id,
            &CreatePersonaRequest {
                name: "Mentor".to_owned(),
                description: "A mentor".to_owned(),
                training_data: String::new(),
            },
        )
        .await
        .unwrap();

    let fetched = database.personas().get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Mentor");
    assert_eq!(fetched.owner_id, Some(user.id));
    assert!(!fetched.is_predefined);
}

#[tokio::test]
async fn test_otp_verification_consumes_code() {
    let database = create_test_database().await.unwrap();
    let user = database
        .users()
        .create(Some("otp@example.com"), None)
        .await
        .unwrap();

    let expires_at = Utc::now() + Duration::minutes(10);
    database
        .users()
        .create_otp(user.id, "424242", expires_at)
        .await
        .unwrap();

    assert!(database.users().verify_otp(user.id, "424242").await.unwrap());
    // Second use fails
    assert!(!database.users().verify_otp(user.id, "424242").await.unwrap());
}

#[tokio::test]
async fn test_expired_otp_is_rejected() {
    let database = create_test_database().await.unwrap();
    let user = database
        .users()
        .create(Some("expired@example.com"), None)
        .await
        .unwrap();

    let expires_at = Utc::now() - Duration::minutes(1);
    database
        .users()
        .create_otp(user.id, "424242", expires_at)
        .await
        .unwrap();

    assert!(!database.users().verify_otp(user.id, "424242").await.unwrap());
}

#[tokio::test]
async fn test_knowledge_update_refreshes_timestamp() {
    let database = create_test_database().await.unwrap();
    let user = database
        .users()
        .create(Some("kb@example.com"), None)
        .await
        .unwrap();

    let entry = database
        .knowledge_base()
        .create(user.id, "question", "answer")
        .await
        .unwrap();

    let updated = database
        .knowledge_base()
        .update(entry.id, user.id, "question", "new answer")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.answer, "new answer");
    assert!(updated.updated_at >= entry.updated_at);
    assert_eq!(updated.created_at, entry.created_at);
}
