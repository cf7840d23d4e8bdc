//! Service helpers that expose read-only public projections of the score board.

use crate::{
    dto::{public::ScoresResponse, ws::PlayerScore},
    error::ServiceError,
    services::scoreboard_service,
    state::SharedState,
};

/// Return the whole board in submission order.
pub async fn get_scores(state: &SharedState) -> ScoresResponse {
    ScoresResponse {
        scores: scoreboard_service::scores(state).await,
    }
}

/// Return the record owned by the connection `id`.
pub async fn get_score(state: &SharedState, id: &str) -> Result<PlayerScore, ServiceError> {
    scoreboard_service::score(state, id).await
}
