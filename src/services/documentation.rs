use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the scoreboard server.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::public::get_scores,
        crate::routes::public::get_score,
        crate::routes::websocket::ws_handler,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::public::ScoresResponse,
            crate::dto::ws::PlayerScore,
            crate::dto::ws::ScoreSubmission,
            crate::dto::ws::ConnectedPayload,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "public", description = "Read-only score board projections"),
        (name = "scores", description = "WebSocket channel for score submissions and broadcasts"),
    )
)]
pub struct ApiDoc;
