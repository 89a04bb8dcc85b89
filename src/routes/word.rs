use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::word::{GenerateWordRequest, GeneratedWordResponse, WordResponse},
    error::AppError,
    services::word_service,
    state::SharedState,
};

/// Session-independent word endpoints backing the "skip generation" affordance.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/words/random", get(random_word))
        .route("/api/words/generate", post(generate_word))
}

#[utoipa::path(
    get,
    path = "/api/words/random",
    tag = "words",
    responses((status = 200, description = "Word from the fixed pool", body = WordResponse))
)]
/// Draw a word from the fixed pool.
pub async fn random_word(State(state): State<SharedState>) -> Json<WordResponse> {
    Json(word_service::random_word(&state).await)
}

#[utoipa::path(
    post,
    path = "/api/words/generate",
    tag = "words",
    request_body = GenerateWordRequest,
    responses(
        (status = 200, description = "Generated word, or flagged fallback", body = GeneratedWordResponse),
        (status = 500, description = "Word generation failed (strict mode)", body = crate::error::ErrorBody)
    )
)]
/// Generate a word, optionally constrained to a topic.
pub async fn generate_word(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<GenerateWordRequest>>,
) -> Result<Json<GeneratedWordResponse>, AppError> {
    let generated = word_service::generate_word(&state, payload).await?;
    Ok(Json(generated))
}
