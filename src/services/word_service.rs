//! Session-independent word endpoints.

use crate::{
    dto::word::{GenerateWordRequest, GeneratedWordResponse, WordResponse},
    error::ServiceError,
    state::SharedState,
};

/// Draw a word from the fixed pool.
pub async fn random_word(state: &SharedState) -> WordResponse {
    let word = {
        let mut rng = state.rng().lock().await;
        state.words().pick_fixed(&mut *rng)
    };
    WordResponse { word }
}

/// Generate a word under the configured fallback policy, without touching any round.
pub async fn generate_word(
    state: &SharedState,
    request: GenerateWordRequest,
) -> Result<GeneratedWordResponse, ServiceError> {
    let resolved = state
        .words()
        .resolve(request.topic.as_deref(), true, state.rng())
        .await?;

    Ok(GeneratedWordResponse {
        word: resolved.word,
        fallback: resolved.fallback,
    })
}
