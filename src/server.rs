// ABOUTME: HTTP server assembly binding all route modules into one router
// ABOUTME: Applies CORS and request tracing, then serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server
//!
//! [`HttpServer`] merges every route module into a single router, layers on
//! CORS and request tracing, and serves it until the process receives an
//! interrupt signal.

use axum::Router;
use http::{header::HeaderName, HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, ConversationRoutes, HealthRoutes, KnowledgeBaseRoutes, NlpRoutes, PersonaRoutes,
    UserRoutes,
};

/// Configure CORS for the HTTP API
///
/// A wildcard ("*") or empty origin list allows any origin; otherwise only
/// the configured origins are permitted.
fn setup_cors(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty()
        || allowed_origins.iter().any(|o| o == "*")
    {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    HeaderValue::from_str(trimmed).ok()
                }
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

/// The assembled HTTP server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server over shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router with middleware applied
    #[must_use]
    pub fn router(&self) -> Router {
        let cors = setup_cors(&self.resources.config.cors.allowed_origins);

        Router::new()
            .merge(HealthRoutes::routes())
            .merge(AuthRoutes::routes(Arc::clone(&self.resources)))
            .merge(UserRoutes::routes(Arc::clone(&self.resources)))
            .merge(PersonaRoutes::routes(Arc::clone(&self.resources)))
            .merge(KnowledgeBaseRoutes::routes(Arc::clone(&self.resources)))
            .merge(ConversationRoutes::routes(Arc::clone(&self.resources)))
            .merge(NlpRoutes::routes(Arc::clone(&self.resources)))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Bind the configured port and serve until interrupted
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server fails
    /// while running
    pub async fn run(self) -> AppResult<()> {
        let port = self.resources.config.http_port;
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
            .await
            .map_err(|e| AppError::config(format!("Failed to bind port {port}: {e}")))?;

        info!("HTTP server listening on http://0.0.0.0:{port}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))
    }
}

/// Resolve when the process receives an interrupt signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {e}");
        return;
    }
    info!("Shutdown signal received, stopping server");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_cors_accepts_wildcard() {
        // Should not panic and should produce a layer
        let _ = setup_cors(&["*".to_owned()]);
        let _ = setup_cors(&[]);
    }

    #[test]
    fn test_setup_cors_accepts_origin_list() {
        let origins = vec![
            "http://localhost:3000".to_owned(),
            "https://app.example.com".to_owned(),
        ];
        let _ = setup_cors(&origins);
    }
}
