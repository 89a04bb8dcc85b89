use axum::Router;

use crate::state::SharedState;

/// Caller identity extractor.
pub mod client;
/// Swagger UI.
pub mod docs;
/// Liveness route.
pub mod health;
/// Round lifecycle routes.
pub mod round;
/// Standalone word routes.
pub mod word;

/// Compose all route trees and bind the shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(round::router())
        .merge(word::router())
        .merge(docs::router())
        .with_state(state)
}
