use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with a static health payload and the number of open connections.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.connections().len())
}
