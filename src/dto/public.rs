use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::ws::PlayerScore;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Current board, in submission order.
pub struct ScoresResponse {
    /// Latest score of every connected client.
    pub scores: Vec<PlayerScore>,
}
