//! Wire payloads exchanged over HTTP and WebSocket.

/// Health check payloads.
pub mod health;
/// Read-only board projections.
pub mod public;
/// Real-time channel events.
pub mod ws;
