//! Library crate for bara-alsalfa-back, exposing modules for binaries and integration tests.

/// Configuration file and environment loading.
pub mod config;
/// Outbound adapters: completion backends and session storage.
pub mod dao;
/// Request and response payloads.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// Axum routers.
pub mod routes;
/// Business operations behind the routes.
pub mod services;
/// Shared application state and the round state machine.
pub mod state;
