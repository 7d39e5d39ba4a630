// ABOUTME: Route handler for chat conversation turns
// ABOUTME: Resolves persona and knowledge base, then delegates to the response generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation route
//!
//! One request is one stateless chat turn: the caller names a persona and
//! optionally a mode, and the response is either a knowledge-base answer or
//! the persona-driven fallback template. No conversation history is kept.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthResult;
use crate::errors::AppError;
use crate::modes::DEFAULT_MODE;
use crate::resources::ServerResources;

/// Request body for a conversation turn
#[derive(Debug, Deserialize)]
pub struct ConverseBody {
    /// Persona to answer as
    pub persona_id: Uuid,
    /// Conversation mode; defaults to the educator mode
    pub mode: Option<String>,
    /// The user's chat input
    pub input: String,
}

/// Response for a conversation turn
#[derive(Debug, Serialize, Deserialize)]
pub struct ConverseResponse {
    /// Generated assistant response
    pub response: String,
}

/// Conversation routes handler
pub struct ConversationRoutes;

impl ConversationRoutes {
    /// Create all conversation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/conversation", post(Self::handle_converse))
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

    /// Handle POST /api/conversation - Generate a response for one chat turn
    async fn handle_converse(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<ConverseBody>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        if body.input.trim().is_empty() {
            return Err(AppError::missing_field("input"));
        }

        let persona = resources
            .database
            .personas()
            .get(body.persona_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Persona {}", body.persona_id)))?;

        let entries = resources
            .database
            .knowledge_base()
            .list_for_user(auth.user_id)
            .await?;

        let mode = body.mode.as_deref().unwrap_or(DEFAULT_MODE);
        let response_text =
            resources
                .response_generator
                .generate(&body.input, &persona, mode, &entries);

        let response = ConverseResponse {
            response: response_text,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
