// ABOUTME: Application-wide constants for limits, environment variables, and service identity
// ABOUTME: Centralizes magic values so configuration and validation share one source of truth
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application constants and configuration values

/// Operational limits and validation bounds
pub mod limits {
    /// Minutes a one-time code stays valid after issuance
    pub const OTP_EXPIRY_MINUTES: i64 = 10;

    /// Number of digits in a one-time code
    pub const OTP_CODE_DIGITS: usize = 6;

    /// Maximum length of a persona display name
    pub const MAX_PERSONA_NAME_LENGTH: usize = 64;

    /// Maximum length of a knowledge-base question
    pub const MAX_KB_QUESTION_LENGTH: usize = 256;
}

/// Environment variable names read by configuration
pub mod env_config {
    /// HTTP port override
    pub const HTTP_PORT: &str = "HTTP_PORT";

    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";

    /// Secret used to sign session JWTs
    pub const JWT_SECRET: &str = "JWT_SECRET";

    /// Hours a session token stays valid
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";

    /// Comma-separated list of allowed CORS origins, or `*`
    pub const CORS_ORIGINS: &str = "CORS_ORIGINS";

    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";

    /// Log output format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;

    /// Default `SQLite` database location
    pub const DATABASE_URL: &str = "sqlite:data/aipersonas.db";

    /// Default session token lifetime in hours
    pub const JWT_EXPIRY_HOURS: i64 = 24;

    /// Default CORS origins for local frontend development
    pub const CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
}

/// Service identity for structured logging
pub mod service_names {
    /// Canonical service name
    pub const AIPERSONAS_SERVER: &str = "aipersonas-server";
}
