// ABOUTME: Helper module exports for integration tests
// ABOUTME: Provides HTTP testing utilities shared across test files

pub mod axum_test;
