// ABOUTME: Route module organization for the aipersonas HTTP endpoints
// ABOUTME: Centralized route definitions organized by domain with thin handler functions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route module for the aipersonas backend
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains only route definitions and thin handler functions that delegate
//! to the database accessors and core logic.

/// OTP request/verification routes
pub mod auth;
/// Chat conversation route
pub mod conversation;
/// Health check and readiness routes
pub mod health;
/// Knowledge-base CRUD routes
pub mod knowledge_base;
/// Text analysis diagnostic routes
pub mod nlp;
/// Persona listing and creation routes
pub mod personas;
/// User profile routes
pub mod users;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Conversation route handlers
pub use conversation::ConversationRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Knowledge-base route handlers
pub use knowledge_base::KnowledgeBaseRoutes;
/// NLP diagnostic route handlers
pub use nlp::NlpRoutes;
/// Persona route handlers
pub use personas::PersonaRoutes;
/// User profile route handlers
pub use users::UserRoutes;
