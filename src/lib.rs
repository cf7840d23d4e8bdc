//! Library crate for scoreboard-back, exposing modules for binaries and integration tests.

/// Client side of the real-time channel.
pub mod client;
/// Runtime configuration.
pub mod config;
/// Wire payloads.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP and WebSocket routes.
pub mod routes;
/// Board logic, broadcasting and connection handling.
pub mod services;
/// Shared server state.
pub mod state;
