use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded" when generation has no credential).
    pub status: String,
    /// Rounds currently held in memory.
    pub active_sessions: usize,
    /// Whether a completion credential is configured.
    pub generation_configured: bool,
}

impl HealthResponse {
    /// Create a health response indicating every feature is available.
    pub fn ok(active_sessions: usize) -> Self {
        Self {
            status: "ok".to_string(),
            active_sessions,
            generation_configured: true,
        }
    }

    /// Create a health response indicating rounds only use the fixed pool.
    pub fn degraded(active_sessions: usize) -> Self {
        Self {
            status: "degraded".to_string(),
            active_sessions,
            generation_configured: false,
        }
    }
}
