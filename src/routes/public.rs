use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::{public::ScoresResponse, ws::PlayerScore},
    error::AppError,
    services::public_service,
    state::SharedState,
};

/// Public read-only endpoints that expose the current board.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/public/scores", get(get_scores))
        .route("/public/scores/{id}", get(get_score))
}

#[utoipa::path(
    get,
    path = "/public/scores",
    tag = "public",
    responses((status = 200, description = "Current board", body = ScoresResponse))
)]
/// Return the latest score of every connected client, in submission order.
pub async fn get_scores(State(state): State<SharedState>) -> Json<ScoresResponse> {
    Json(public_service::get_scores(&state).await)
}

#[utoipa::path(
    get,
    path = "/public/scores/{id}",
    tag = "public",
    params(("id" = String, Path, description = "Connection identifier")),
    responses(
        (status = 200, description = "Score of the connection", body = PlayerScore),
        (status = 404, description = "Connection has no score")
    )
)]
/// Return the latest score submitted by one connection.
pub async fn get_score(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerScore>, AppError> {
    let payload = public_service::get_score(&state, &id).await?;
    Ok(Json(payload))
}
