// ABOUTME: Integration tests for the knowledge-base route handlers
// ABOUTME: Tests entry CRUD, validation, ordering, and cross-user isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{create_test_server_resources, create_test_user, create_test_user_with_email};
use helpers::axum_test::AxumTestRequest;

use aipersonas::resources::ServerResources;
use aipersonas::routes::knowledge_base::KnowledgeEntryResponse;
use aipersonas::routes::KnowledgeBaseRoutes;

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

async fn setup_test_environment() -> (Arc<ServerResources>, axum::Router, String) {
    let resources = create_test_server_resources().await.unwrap();
    let user = create_test_user(&resources.database).await.unwrap();
    let token = resources.auth_manager.generate_token(&user).unwrap();
    let router = KnowledgeBaseRoutes::routes(Arc::clone(&resources));
    (resources, router, format!("Bearer {token}"))
}

async fn create_entry(router: &axum::Router, token: &str, question: &str, answer: &str) -> KnowledgeEntryResponse {
    let response = AxumTestRequest::post("/api/kb")
        .header("authorization", token)
        .json(&json!({"question": question, "answer": answer}))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_kb_requires_auth() {
    let (_resources, router, _token) = setup_test_environment().await;

    let response = AxumTestRequest::get("/api/kb").send(router).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_entries() {
    let (_resources, router, token) = setup_test_environment().await;

    let entry = create_entry(&router, &token, "refund policy", "30 days").await;
    assert_eq!(entry.question, "refund policy");
    assert_eq!(entry.answer, "30 days");

    let list = AxumTestRequest::get("/api/kb")
        .header("authorization", &token)
        .send(router)
        .await;
    assert_eq!(list.status_code(), StatusCode::OK);

    let entries: Vec<KnowledgeEntryResponse> = list.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, entry.id);
}

#[tokio::test]
async fn test_list_preserves_creation_order() {
    let (_resources, router, token) = setup_test_environment().await;

    create_entry(&router, &token, "first question", "a").await;
    create_entry(&router, &token, "second question", "b").await;
    create_entry(&router, &token, "third question", "c").await;

    let list = AxumTestRequest::get("/api/kb")
        .header("authorization", &token)
        .send(router)
        .await;
    let entries: Vec<KnowledgeEntryResponse> = list.json();

    let questions: Vec<&str> = entries.iter().map(|e| e.question.as_str()).collect();
    assert_eq!(
        questions,
        vec!["first question", "second question", "third question"]
    );
}

#[tokio::test]
async fn test_create_entry_rejects_empty_question() {
    let (_resources, router, token) = setup_test_environment().await;

    let response = AxumTestRequest::post("/api/kb")
        .header("authorization", &token)
        .json(&json!({"question": "", "answer": "something"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_entry_rejects_oversized_question() {
    let (_resources, router, token) = setup_test_environment().await;

    let response = AxumTestRequest::post("/api/kb")
        .header("authorization", &token)
        .json(&json!({"question": "q".repeat(257), "answer": "a"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_entry() {
    let (_resources, router, token) = setup_test_environment().await;

    let entry = create_entry(&router, &token, "shipping", "5 days").await;

    let response = AxumTestRequest::put(&format!("/api/kb/{}", entry.id))
        .header("authorization", &token)
        .json(&json!({"question": "shipping times", "answer": "3 days"}))
        .send(router.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let updated: KnowledgeEntryResponse = response.json();
    assert_eq!(updated.id, entry.id);
    assert_eq!(updated.question, "shipping times");
    assert_eq!(updated.answer, "3 days");

    let list = AxumTestRequest::get("/api/kb")
        .header("authorization", &token)
        .send(router)
        .await;
    let entries: Vec<KnowledgeEntryResponse> = list.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].question, "shipping times");
}

#[tokio::test]
async fn test_update_unknown_entry_not_found() {
    let (_resources, router, token) = setup_test_environment().await;

    let response = AxumTestRequest::put(&format!("/api/kb/{}", Uuid::new_v4()))
        .header("authorization", &token)
        .json(&json!({"question": "q", "answer": "a"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_entry() {
    let (_resources, router, token) = setup_test_environment().await;

    let entry = create_entry(&router, &token, "warranty", "two years").await;

    let response = AxumTestRequest::delete(&format!("/api/kb/{}", entry.id))
        .header("authorization", &token)
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let list = AxumTestRequest::get("/api/kb")
        .header("authorization", &token)
        .send(router)
        .await;
    let entries: Vec<KnowledgeEntryResponse> = list.json();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_entry_not_found() {
    let (_resources, router, token) = setup_test_environment().await;

    let response = AxumTestRequest::delete(&format!("/api/kb/{}", Uuid::new_v4()))
        .header("authorization", &token)
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_entries_are_isolated_per_user() {
    let (resources, router, token) = setup_test_environment().await;

    let other = create_test_user_with_email(&resources.database, "other@example.com")
        .await
        .unwrap();
    let other_token = format!(
        "Bearer {}",
        resources.auth_manager.generate_token(&other).unwrap()
    );

    let entry = create_entry(&router, &token, "secret question", "secret answer").await;

    // The other user cannot see, update, or delete this entry
    let list = AxumTestRequest::get("/api/kb")
        .header("authorization", &other_token)
        .send(router.clone())
        .await;
    let entries: Vec<KnowledgeEntryResponse> = list.json();
    assert!(entries.is_empty());

    let update = AxumTestRequest::put(&format!("/api/kb/{}", entry.id))
        .header("authorization", &other_token)
        .json(&json!({"question": "hijacked", "answer": "x"}))
        .send(router.clone())
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);

    let delete = AxumTestRequest::delete(&format!("/api/kb/{}", entry.id))
        .header("authorization", &other_token)
        .send(router)
        .await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);
}
