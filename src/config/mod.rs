// ABOUTME: Configuration module organization for environment-driven server settings
// ABOUTME: Re-exports the server configuration types used across the crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management

/// Environment-based configuration management
pub mod environment;

pub use environment::{AuthConfig, CorsConfig, Environment, LogLevel, ServerConfig};
