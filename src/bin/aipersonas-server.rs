// ABOUTME: Server binary wiring configuration, database, and the HTTP router
// ABOUTME: Loads the language model at startup and serves the persona chat API
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # aipersonas API Server Binary
//!
//! This binary starts the persona chat backend with OTP authentication,
//! per-user knowledge bases, and rule-based response generation.

use anyhow::Result;
use clap::Parser;
use rand::RngCore;
use std::sync::Arc;
use tracing::{error, info, warn};

use aipersonas::{
    auth::AuthManager,
    config::environment::ServerConfig,
    database::Database,
    logging,
    nlp::LanguageModel,
    resources::ServerResources,
    server::HttpServer,
};
use aipersonas::modes::ModeRegistry;

#[derive(Parser)]
#[command(name = "aipersonas-server")]
#[command(about = "aipersonas - Persona-driven chat assistant backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using default configuration");
            Args { http_port: None }
        }
    };

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Override port if specified
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting aipersonas server");
    info!("{}", config.summary());

    // Load the language model before accepting traffic; a missing model is fatal
    let analyzer = LanguageModel::load()?;
    info!("Language model loaded");

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized: {}", config.database_url);

    let jwt_secret = config.auth.jwt_secret.clone().unwrap_or_else(|| {
        warn!("JWT_SECRET not set; generating an ephemeral secret (sessions will not survive restarts)");
        let mut bytes = [0_u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    });

    let auth_manager = AuthManager::new(
        jwt_secret.into_bytes(),
        config.auth.jwt_expiry_hours,
    );
    info!("Authentication manager initialized");

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(analyzer),
        ModeRegistry::with_builtin_modes(),
        Arc::new(config.clone()),
    ));

    display_available_endpoints(&config);

    let server = HttpServer::new(resources);
    if let Err(e) = server.run().await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}

/// Display all available API endpoints with their ports
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("Authentication:");
    info!("   Request OTP:       POST http://{host}:{port}/api/auth/request_otp");
    info!("   Verify OTP:        POST http://{host}:{port}/api/auth/verify_otp");
    info!("   Profile:           GET  http://{host}:{port}/api/me");
    info!("Personas:");
    info!("   List Personas:     GET  http://{host}:{port}/api/persona");
    info!("   Create Persona:    POST http://{host}:{port}/api/persona");
    info!("Knowledge Base:");
    info!("   List Entries:      GET  http://{host}:{port}/api/kb");
    info!("   Create Entry:      POST http://{host}:{port}/api/kb");
    info!("   Update Entry:      PUT  http://{host}:{port}/api/kb/{{id}}");
    info!("   Delete Entry:      DELETE http://{host}:{port}/api/kb/{{id}}");
    info!("Conversation:");
    info!("   Chat Turn:         POST http://{host}:{port}/api/conversation");
    info!("Text Analysis:");
    info!("   Preprocess:        POST http://{host}:{port}/api/nlp/preprocess");
    info!("   Entities:          POST http://{host}:{port}/api/nlp/entities");
    info!("Monitoring:");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
    info!("=== End of Endpoint List ===");
}
