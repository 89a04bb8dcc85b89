use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether generation is available along with the number of live sessions.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let active_sessions = state.sessions().len();

    if state.words().generation_configured() {
        HealthResponse::ok(active_sessions)
    } else {
        warn!("no generation credential configured; rounds use the fixed word pool");
        HealthResponse::degraded(active_sessions)
    }
}
