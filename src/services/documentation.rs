use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Bara Al-Salfa backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::round::start_round,
        crate::routes::round::reveal_player,
        crate::routes::round::current_player,
        crate::routes::round::advance_turn,
        crate::routes::round::reset_round,
        crate::routes::word::random_word,
        crate::routes::word::generate_word,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::round::StartRoundRequest,
            crate::dto::round::RoundStartedResponse,
            crate::dto::round::RevealResponse,
            crate::dto::round::CurrentPlayerResponse,
            crate::dto::round::AdvanceTurnResponse,
            crate::dto::round::ResetRoundResponse,
            crate::dto::word::WordResponse,
            crate::dto::word::GenerateWordRequest,
            crate::dto::word::GeneratedWordResponse,
            crate::error::ErrorBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "round", description = "Secret word rounds, one per client"),
        (name = "words", description = "Session-independent word picks"),
    )
)]
pub struct ApiDoc;
