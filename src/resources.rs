// ABOUTME: Shared server state handed to every route module
// ABOUTME: Bundles database, auth manager, language model, mode registry, and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared server resources
//!
//! One [`ServerResources`] is built at startup and shared behind an `Arc`
//! by every route module. Everything in here is either read-only after
//! construction or internally synchronized (the connection pool), so no
//! additional locking is needed.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::conversation::ResponseGenerator;
use crate::database::Database;
use crate::modes::ModeRegistry;
use crate::nlp::TextAnalyzer;

/// Shared state for all route handlers
pub struct ServerResources {
    /// Database access
    pub database: Database,
    /// Session token and OTP management
    pub auth_manager: AuthManager,
    /// Process-wide text analyzer (language model or a test fake)
    pub analyzer: Arc<dyn TextAnalyzer>,
    /// Conversation mode registry
    pub mode_registry: Arc<ModeRegistry>,
    /// Response generator over the mode registry
    pub response_generator: ResponseGenerator,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble shared resources
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        analyzer: Arc<dyn TextAnalyzer>,
        mode_registry: ModeRegistry,
        config: Arc<ServerConfig>,
    ) -> Self {
        let mode_registry = Arc::new(mode_registry);
        let response_generator = ResponseGenerator::new(Arc::clone(&mode_registry));

        Self {
            database,
            auth_manager,
            analyzer,
            mode_registry,
            response_generator,
            config,
        }
    }
}
