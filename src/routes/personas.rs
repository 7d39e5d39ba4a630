// ABOUTME: Route handlers for persona listing and creation
// ABOUTME: Lists shared predefined personas alongside the caller's own
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona routes
//!
//! All endpoints require JWT authentication. Listing returns the shared
//! predefined personas first, then the caller's own.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::AuthResult;
use crate::constants::limits::MAX_PERSONA_NAME_LENGTH;
use crate::database::personas::{CreatePersonaRequest, Persona};
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Response for a persona
#[derive(Debug, Serialize, Deserialize)]
pub struct PersonaResponse {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Whether this is a shared predefined persona
    pub is_predefined: bool,
}

impl From<Persona> for PersonaResponse {
    fn from(persona: Persona) -> Self {
        Self {
            id: persona.id.to_string(),
            name: persona.name,
            description: persona.description,
            is_predefined: persona.is_predefined,
        }
    }
}

/// Request body for creating a persona
#[derive(Debug, Deserialize)]
pub struct CreatePersonaBody {
    /// Display name (must be globally unique)
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Free-text training data
    #[serde(default)]
    pub training_data: String,
}

impl From<CreatePersonaBody> for CreatePersonaRequest {
    fn from(body: CreatePersonaBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            training_data: body.training_data,
        }
    }
}

/// Persona routes handler
pub struct PersonaRoutes;

impl PersonaRoutes {
    /// Create all persona routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/persona", get(Self::handle_list))
            .route("/api/persona", post(Self::handle_create))
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

    /// Handle GET /api/persona - List predefined and owned personas
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        let manager = resources.database.personas();
        let mut personas = manager.list_predefined().await?;
        personas.extend(manager.list_for_user(auth.user_id).await?);

        let response: Vec<PersonaResponse> = personas.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/persona - Create a persona owned by the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreatePersonaBody>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources)?;

        if body.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if body.name.len() > MAX_PERSONA_NAME_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Persona name exceeds {MAX_PERSONA_NAME_LENGTH} characters"
            )));
        }

        let request: CreatePersonaRequest = body.into();
        let persona = resources
            .database
            .personas()
            .create(auth.user_id, &request)
            .await?;

        let response: PersonaResponse = persona.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }
}
