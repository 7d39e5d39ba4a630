// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, and user creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `aipersonas`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use std::sync::{Arc, Once};

use aipersonas::{
    auth::AuthManager,
    config::environment::{AuthConfig, CorsConfig, Environment, LogLevel, ServerConfig},
    database::Database,
    models::User,
    modes::ModeRegistry,
    nlp::LanguageModel,
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Create test authentication manager with a fixed secret
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(b"test-jwt-secret-for-integration-tests".to_vec(), 24)
}

/// Server configuration for tests, independent of the environment
pub fn create_test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".to_owned(),
        environment: Environment::Testing,
        log_level: LogLevel::Warn,
        auth: AuthConfig {
            jwt_secret: Some("test-jwt-secret-for-integration-tests".to_owned()),
            jwt_expiry_hours: 24,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_owned()],
        },
    }
}

/// Assemble full server resources over an in-memory database
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = create_test_auth_manager();
    let analyzer = Arc::new(LanguageModel::load()?);

    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        analyzer,
        ModeRegistry::with_builtin_modes(),
        Arc::new(create_test_config()),
    )))
}

/// Create a test user identified by email
pub async fn create_test_user(database: &Database) -> Result<User> {
    let user = database
        .users()
        .create(Some("test@example.com"), None)
        .await?;
    Ok(user)
}

/// Create a test user with a specific email
pub async fn create_test_user_with_email(database: &Database, email: &str) -> Result<User> {
    let user = database.users().create(Some(email), None).await?;
    Ok(user)
}
