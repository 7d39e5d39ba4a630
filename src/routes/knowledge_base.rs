// ABOUTME: Route handlers for the per-user knowledge base
// ABOUTME: CRUD over question/answer entries scoped to the authenticated caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base routes
//!
//! All endpoints require JWT authentication and operate only on entries
//! owned by the caller. Entry ids from other users behave as not found.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthResult;
use crate::constants::limits::MAX_KB_QUESTION_LENGTH;
use crate::database::knowledge_base::KnowledgeEntry;
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Response for a knowledge-base entry
#[derive(Debug, Serialize, Deserialize)]
pub struct KnowledgeEntryResponse {
    /// Unique identifier
    pub id: String,
    /// Question text matched against chat input
    pub question: String,
    /// Stored answer returned verbatim on a match
    pub answer: String,
}

impl From<KnowledgeEntry> for KnowledgeEntryResponse {
    fn from(entry: KnowledgeEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            question: entry.question,
            answer: entry.answer,
        }
    }
}

/// Request body for creating or updating an entry
#[derive(Debug, Deserialize)]
pub struct KnowledgeEntryBody {
    /// Question text
    pub question: String,
    /// Answer text
    #[serde(default)]
    pub answer: String,
}

/// Knowledge-base routes handler
pub struct KnowledgeBaseRoutes;

impl KnowledgeBaseRoutes {
    /// Create all knowledge-base routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/kb", get(Self::handle_list))
            .route("/api/kb", post(Self::handle_create))
            .route("/api/kb/:id", put(Self::handle_update))
            .route("/api/kb/:id", delete(Self::handle_delete))
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

    /// Reject empty or oversized question text
    fn validate_body(body: &KnowledgeEntryBody) -> Result<(), AppError> {
        if body.question.trim().is_empty() {
            return Err(AppError::missing_field("question"));
        }
        if body.question.len() > MAX_KB_QUESTION_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Question exceeds {MAX_KB_QUESTION_LENGTH} characters"
            )));
        }
        Ok(())
    }

    /// Handle GET /api/kb - List the caller's entries in creation order
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let entries = resources
            .database
            .knowledge_base()
            .list_for_user(auth.user_id)
            .await?;

        let response: Vec<KnowledgeEntryResponse> = entries.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/kb - Create an entry for the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<KnowledgeEntryBody>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        Self::validate_body(&body)?;

        let entry = resources
            .database
            .knowledge_base()
            .create(auth.user_id, &body.question, &body.answer)
            .await?;

        let response: KnowledgeEntryResponse = entry.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle PUT /api/kb/:id - Update an entry owned by the caller
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(entry_id): Path<Uuid>,
        Json(body): Json<KnowledgeEntryBody>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;
        Self::validate_body(&body)?;

        let entry = resources
            .database
            .knowledge_base()
            .update(entry_id, auth.user_id, &body.question, &body.answer)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Knowledge entry {entry_id}")))?;

        let response: KnowledgeEntryResponse = entry.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/kb/:id - Delete an entry owned by the caller
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(entry_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let removed = resources
            .database
            .knowledge_base()
            .delete(entry_id, auth.user_id)
            .await?;

        if !removed {
            return Err(AppError::not_found(format!("Knowledge entry {entry_id}")));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
