/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Public service for read-only board information.
pub mod public_service;
/// Board mutations and broadcasting.
pub mod scoreboard_service;
/// Periodic board broadcast.
pub mod ticker;
/// WebSocket connection and message handling service.
pub mod websocket_service;
