use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::round::{
        AdvanceTurnResponse, CurrentPlayerResponse, ResetRoundResponse, RevealResponse,
        RoundStartedResponse, StartRoundRequest,
    },
    error::AppError,
    routes::client::ClientId,
    services::round_service,
    state::SharedState,
};

/// Routes driving a round: start, reveal, current player, advance and reset.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/round", post(start_round).delete(reset_round))
        .route("/api/round/current", get(current_player))
        .route("/api/round/reveal/{index}", get(reveal_player))
        .route("/api/round/advance", post(advance_turn))
}

/// Start a new round for the calling client, replacing any previous one.
#[utoipa::path(
    post,
    path = "/api/round",
    tag = "round",
    params(("X-Client-Id" = String, Header, description = "Identifier of the client owning the round")),
    request_body = StartRoundRequest,
    responses(
        (status = 200, description = "Round started", body = RoundStartedResponse),
        (status = 400, description = "Invalid roster or topic", body = crate::error::ErrorBody),
        (status = 500, description = "Word generation failed (strict mode)", body = crate::error::ErrorBody)
    )
)]
pub async fn start_round(
    State(state): State<SharedState>,
    client: ClientId,
    Valid(Json(payload)): Valid<Json<StartRoundRequest>>,
) -> Result<Json<RoundStartedResponse>, AppError> {
    let started = round_service::start_round(&state, client.as_str(), payload).await?;
    Ok(Json(started))
}

/// Reveal the word, or the odd-one-out marker, for the player at `index`.
#[utoipa::path(
    get,
    path = "/api/round/reveal/{index}",
    tag = "round",
    params(
        ("X-Client-Id" = String, Header, description = "Identifier of the client owning the round"),
        ("index" = i64, Path, description = "Zero-based player index")
    ),
    responses(
        (status = 200, description = "Player assignment", body = RevealResponse),
        (status = 400, description = "Index outside the roster", body = crate::error::ErrorBody),
        (status = 404, description = "No active round", body = crate::error::ErrorBody)
    )
)]
pub async fn reveal_player(
    State(state): State<SharedState>,
    client: ClientId,
    index: Result<Path<i64>, PathRejection>,
) -> Result<Json<RevealResponse>, AppError> {
    let Path(index) = index.map_err(|rejection| AppError::BadRequest {
        code: "invalid_index",
        message: rejection.body_text(),
    })?;
    let reveal = round_service::reveal_player(&state, client.as_str(), index).await?;
    Ok(Json(reveal))
}

/// Return the player whose turn it currently is.
#[utoipa::path(
    get,
    path = "/api/round/current",
    tag = "round",
    params(("X-Client-Id" = String, Header, description = "Identifier of the client owning the round")),
    responses(
        (status = 200, description = "Current player", body = CurrentPlayerResponse),
        (status = 404, description = "No active round", body = crate::error::ErrorBody)
    )
)]
pub async fn current_player(
    State(state): State<SharedState>,
    client: ClientId,
) -> Result<Json<CurrentPlayerResponse>, AppError> {
    let current = round_service::current_player(&state, client.as_str()).await?;
    Ok(Json(current))
}

/// Hand the turn to the next player.
#[utoipa::path(
    post,
    path = "/api/round/advance",
    tag = "round",
    params(("X-Client-Id" = String, Header, description = "Identifier of the client owning the round")),
    responses(
        (status = 200, description = "Turn advanced or round complete", body = AdvanceTurnResponse),
        (status = 404, description = "No active round", body = crate::error::ErrorBody)
    )
)]
pub async fn advance_turn(
    State(state): State<SharedState>,
    client: ClientId,
) -> Result<Json<AdvanceTurnResponse>, AppError> {
    let advance = round_service::advance_turn(&state, client.as_str()).await?;
    Ok(Json(advance))
}

/// Discard the caller's round.
#[utoipa::path(
    delete,
    path = "/api/round",
    tag = "round",
    params(("X-Client-Id" = String, Header, description = "Identifier of the client owning the round")),
    responses(
        (status = 200, description = "Round cleared", body = ResetRoundResponse),
        (status = 404, description = "No active round", body = crate::error::ErrorBody)
    )
)]
pub async fn reset_round(
    State(state): State<SharedState>,
    client: ClientId,
) -> Result<Json<ResetRoundResponse>, AppError> {
    let reset = round_service::reset_round(&state, client.as_str()).await?;
    Ok(Json(reset))
}
