// ABOUTME: Route handlers for the authenticated user's profile
// ABOUTME: Exposes the caller's account record under /api/me
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User profile routes

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::AuthResult;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Response for the caller's profile
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Unique identifier
    pub id: String,
    /// Registered email, if any
    pub email: Option<String>,
    /// Registered phone, if any
    pub phone: Option<String>,
    /// Account creation timestamp
    pub created_at: String,
}

/// User profile routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Extract and authenticate the caller from the authorization header
    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
        resources.auth_manager.authenticate_header(auth_header)
    }

    /// Handle GET /api/me - The caller's profile
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let user = resources
            .database
            .users()
            .get(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;

        let response = ProfileResponse {
            id: user.id.to_string(),
            email: user.email,
            phone: user.phone,
            created_at: user.created_at.to_rfc3339(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
