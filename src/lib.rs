// ABOUTME: Main library entry point for the aipersonas chat assistant backend
// ABOUTME: Provides OTP authentication, persona/knowledge-base CRUD, and chat response generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # aipersonas
//!
//! A persona-driven chat assistant backend. Users authenticate with one-time
//! codes, manage personas and per-user knowledge-base Q/A entries, and chat
//! against a rule-based response generator that matches knowledge-base
//! questions before falling back to a persona/mode template.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Routes**: Thin HTTP handlers over axum, one module per domain
//! - **Database**: `SQLite` persistence with per-domain manager structs
//! - **Conversation**: Knowledge-base matching and fallback templating
//! - **Nlp**: Tokenization, lemmatization, and entity extraction over a
//!   process-wide language model loaded once at startup
//! - **Auth**: OTP issuance and JWT session tokens

/// JWT session management and one-time code generation
pub mod auth;

/// Environment-based configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Response generation from knowledge-base matches and persona/mode templates
pub mod conversation;

/// `SQLite` database management and per-domain accessors
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// Common data models for users and one-time codes
pub mod models;

/// Conversation mode registry (interviewer, critic, educator)
pub mod modes;

/// Text normalization and named-entity extraction
pub mod nlp;

/// Shared server state handed to every route module
pub mod resources;

/// HTTP routes for authentication, CRUD, and chat endpoints
pub mod routes;

/// HTTP server assembly and serve loop
pub mod server;
