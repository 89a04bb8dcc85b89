/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Round lifecycle: start, reveal, current player, advance, reset.
pub mod round_service;
/// Background purge of idle sessions.
pub mod session_sweeper;
/// Generated and fixed-pool word selection.
pub mod word_source;
/// Session-independent word endpoints.
pub mod word_service;
