// ABOUTME: Integration tests for the health check route handlers
// ABOUTME: Tests health and readiness endpoints over the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::create_test_server_resources;
use helpers::axum_test::AxumTestRequest;

use aipersonas::routes::HealthRoutes;
use aipersonas::server::HttpServer;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_endpoint() {
    let router = HealthRoutes::routes();

    let response = AxumTestRequest::get("/health").send(router).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "aipersonas-server");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready_endpoint() {
    let router = HealthRoutes::routes();

    let response = AxumTestRequest::get("/ready").send(router).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_full_router_serves_health_and_api() {
    let resources = create_test_server_resources().await.unwrap();
    let router = HttpServer::new(resources).router();

    let health = AxumTestRequest::get("/health").send(router.clone()).await;
    assert_eq!(health.status_code(), StatusCode::OK);

    // A protected API route is wired into the same router
    let me = AxumTestRequest::get("/api/me").send(router).await;
    assert_eq!(me.status_code(), StatusCode::UNAUTHORIZED);
}
