// ABOUTME: Route handlers for text-analysis diagnostics
// ABOUTME: Exposes tokenization and entity extraction over the shared analyzer
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NLP diagnostic routes
//!
//! These endpoints expose the shared text analyzer directly so clients can
//! inspect how input text is normalized. They take no authentication and
//! touch no per-user state.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::AppError;
use crate::nlp::Entity;
use crate::resources::ServerResources;

/// Request body for both diagnostic endpoints
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    /// Raw text to analyze
    pub text: String,
}

/// Response for tokenization
#[derive(Debug, Serialize, Deserialize)]
pub struct PreprocessResponse {
    /// Normalized tokens in input order
    pub tokens: Vec<String>,
}

/// Response for entity extraction
#[derive(Debug, Serialize, Deserialize)]
pub struct EntitiesResponse {
    /// Recognized entities in input order
    pub entities: Vec<Entity>,
}

/// NLP diagnostic routes handler
pub struct NlpRoutes;

impl NlpRoutes {
    /// Create all NLP diagnostic routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/nlp/preprocess", post(Self::handle_preprocess))
            .route("/api/nlp/entities", post(Self::handle_entities))
            .with_state(resources)
    }

    /// Handle POST /api/nlp/preprocess - Tokenize and normalize text
    async fn handle_preprocess(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<AnalyzeBody>,
    ) -> Result<Response, AppError> {
        let tokens = resources.analyzer.tokenize_and_normalize(&body.text);
        Ok((StatusCode::OK, Json(PreprocessResponse { tokens })).into_response())
    }

    /// Handle POST /api/nlp/entities - Extract named entities from text
    async fn handle_entities(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<AnalyzeBody>,
    ) -> Result<Response, AppError> {
        let entities = resources.analyzer.extract_entities(&body.text);
        Ok((StatusCode::OK, Json(EntitiesResponse { entities })).into_response())
    }
}
